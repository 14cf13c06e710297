use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, Chain, Cursor, Read};
use std::path::Path;

type ChainReader = Chain<Cursor<Vec<u8>>, File>;

const GZIP_MAGIC: [u8; 3] = [0x1F, 0x8B, 0x08];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression format of an input file, detected from its leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Zstd,
    None,
}

impl Compression {
    /// Detect gzip (1F 8B 08) or zstd (28 B5 2F FD) from the first bytes of a file
    pub fn detect(head: &[u8]) -> Self {
        if head.starts_with(&GZIP_MAGIC) {
            Compression::Gzip
        } else if head.starts_with(&ZSTD_MAGIC) {
            Compression::Zstd
        } else {
            Compression::None
        }
    }
}

/// Reader over a record file that transparently decompresses gzip and zstd input
pub enum DecompressionReader {
    Gzip(MultiGzDecoder<ChainReader>),
    Zstd(zstd::Decoder<'static, io::BufReader<ChainReader>>),
    Plain(ChainReader),
}

impl std::fmt::Debug for DecompressionReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecompressionReader::Gzip(_) => write!(f, "DecompressionReader::Gzip"),
            DecompressionReader::Zstd(_) => write!(f, "DecompressionReader::Zstd"),
            DecompressionReader::Plain(_) => write!(f, "DecompressionReader::Plain"),
        }
    }
}

impl Read for DecompressionReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            DecompressionReader::Gzip(reader) => reader.read(buf),
            DecompressionReader::Zstd(reader) => reader.read(buf),
            DecompressionReader::Plain(reader) => reader.read(buf),
        }
    }
}

impl DecompressionReader {
    /// Open `path`, sniffing the first four bytes to pick a decoder
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut file = File::open(path)?;

        let mut head = [0u8; 4];
        let n = read_head(&mut file, &mut head)?;

        // Put the sniffed bytes back in front of the remaining stream
        let chained = Cursor::new(head[..n].to_vec()).chain(file);

        match Compression::detect(&head[..n]) {
            Compression::Gzip => Ok(DecompressionReader::Gzip(MultiGzDecoder::new(chained))),
            Compression::Zstd => Ok(DecompressionReader::Zstd(zstd::Decoder::new(chained)?)),
            Compression::None => Ok(DecompressionReader::Plain(chained)),
        }
    }
}

/// Fill `head` as far as the file allows; short files yield fewer bytes
fn read_head(file: &mut File, head: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < head.len() {
        match file.read(&mut head[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

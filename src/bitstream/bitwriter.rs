use std::io::{self, Write};

use log::trace;

/// Output is handed to the sink whenever this many bytes are buffered.
const DRAIN_SIZE: usize = 64 * 1024;

/// Writes a bitstream to any sink. Holds bits in a small queue until they make whole
/// bytes, and buffers bytes until there is enough to be worth a write call.
pub struct BitWriter<W: Write> {
    /// Output buffer used to write the bitstream.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Handle to the output stream
    writer: W,
    /// Count of records written so far.
    records: usize,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter on top of `writer`. Call finish() when done, or buffered
    /// data is lost.
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(DRAIN_SIZE),
            queue: 0,
            q_bits: 0,
            writer,
            records: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn push_queue(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Put a byte of data on the stream.
    pub fn out8(&mut self, data: u8) {
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
        self.push_queue();
    }

    /// Put the low `depth` bits (0-32) of `data` on the stream.
    pub fn out_word(&mut self, data: u32, depth: u8) {
        if depth == 0 {
            return;
        }
        let depth = depth.min(32);
        self.queue <<= depth;
        self.queue |= data as u64 & ((1_u64 << depth) - 1);
        self.q_bits += depth;
        self.push_queue();
    }

    /// Add one length-prefixed record: a 32 bit big-endian byte count, then the bytes.
    pub fn add_record(&mut self, data: &[u8]) -> io::Result<()> {
        let len = u32::try_from(data.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("record of {} bytes is too large", data.len()),
            )
        })?;
        self.out_word(len, 32);
        data.iter().for_each(|&x| self.out8(x));
        self.records += 1;
        trace!("Record {} queued, {} bytes.", self.records, data.len());
        if self.output.len() >= DRAIN_SIZE {
            self.drain()?;
        }
        Ok(())
    }

    /// Number of records added so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Write the buffered bytes to the sink.
    fn drain(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.output)?;
        self.output.clear();
        Ok(())
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits.
    fn flush_queue(&mut self) {
        self.push_queue();
        if self.q_bits > 0 {
            let mut byte = (self.queue & (0xff >> (8 - self.q_bits)) as u64) as u8;
            byte <<= 8 - self.q_bits;
            self.output.push(byte); //push the packed byte out
            self.q_bits = 0; //adjust the count of bits left in the queue
        }
    }

    /// Pad the last byte, write everything out, flush the sink and hand it back.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush_queue();
        self.drain()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod test {
    use super::BitWriter;

    #[test]
    fn out8_test() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out8(b'x');
        let out = bw.finish().unwrap();
        assert_eq!(out, "x".as_bytes());
    }

    #[test]
    fn last_bits_test() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out8(255);
        bw.out_word(0b111, 3);
        let out = bw.finish().unwrap();
        assert_eq!(out, vec![255, 0b1110_0000]);
    }

    #[test]
    fn word_test() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out_word(0x0061, 16);
        bw.out_word(0x1F600, 32);
        let out = bw.finish().unwrap();
        assert_eq!(out, vec![0, 0x61, 0, 0x01, 0xF6, 0]);
    }

    #[test]
    fn record_test() {
        let mut bw = BitWriter::new(Vec::new());
        bw.add_record(&[0xab, 0xcd]).unwrap();
        bw.add_record(&[]).unwrap();
        assert_eq!(bw.records(), 2);
        let out = bw.finish().unwrap();
        assert_eq!(out, vec![0, 0, 0, 2, 0xab, 0xcd, 0, 0, 0, 0]);
    }
}

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ibw_types::Endian;

/// Буфер для последовательной записи чисел в заданном порядке байт.
#[derive(Debug, Clone)]
pub struct ByteSink {
    buf: Vec<u8>,
    endian: Endian,
}

macro_rules! put_fixed {
    ($name:ident, $ty:ty, $size:expr, $write:ident) => {
        /// Дописывает значение, возвращает его смещение.
        pub fn $name(
            &mut self,
            val: $ty,
        ) -> usize {
            let pos = self.buf.len();
            let mut b = [0u8; $size];
            match self.endian {
                Endian::Little => LittleEndian::$write(&mut b, val),
                Endian::Big => BigEndian::$write(&mut b, val),
            }
            self.buf.extend_from_slice(&b);
            pos
        }
    };
}

impl ByteSink {
    pub fn new(endian: Endian) -> Self {
        Self::with_capacity(endian, 0)
    }

    pub fn with_capacity(
        endian: Endian,
        capacity: usize,
    ) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            endian,
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    put_fixed!(put_u16, u16, 2, write_u16);
    put_fixed!(put_u32, u32, 4, write_u32);
    put_fixed!(put_f32, f32, 4, write_f32);
    put_fixed!(put_f64, f64, 8, write_f64);

    pub fn put_bytes(
        &mut self,
        bytes: &[u8],
    ) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn put_zeros(
        &mut self,
        len: usize,
    ) {
        self.buf.resize(self.buf.len() + len, 0);
    }

    /// Строка фиксированной ширины `maxlen + 1`: не более `maxlen` байт и нули.
    pub fn put_cstr(
        &mut self,
        bytes: &[u8],
        maxlen: usize,
    ) {
        let n = bytes.len().min(maxlen);
        self.buf.extend_from_slice(&bytes[..n]);
        self.put_zeros(maxlen + 1 - n);
    }

    /// Перезаписывает u16 по смещению `pos`.
    pub fn patch_u16(
        &mut self,
        pos: usize,
        val: u16,
    ) {
        let b = &mut self.buf[pos..pos + 2];
        match self.endian {
            Endian::Little => LittleEndian::write_u16(b, val),
            Endian::Big => BigEndian::write_u16(b, val),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ibw_types::{Endian, IbwError, IbwResult};

/// Последовательное чтение из буфера с проверкой границ.
///
/// Порядок байт фиксируется при создании и больше не меняется.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    endian: Endian,
}

macro_rules! read_fixed {
    ($name:ident, $ty:ty, $size:expr, $read:ident) => {
        pub fn $name(&mut self) -> IbwResult<$ty> {
            let b = self.take($size, "field")?;
            Ok(match self.endian {
                Endian::Little => LittleEndian::$read(b),
                Endian::Big => BigEndian::$read(b),
            })
        }
    };
}

impl<'a> ByteCursor<'a> {
    pub fn new(
        buf: &'a [u8],
        endian: Endian,
    ) -> Self {
        Self {
            buf,
            pos: 0,
            endian,
        }
    }

    /// Курсор, начинающий чтение со смещения `pos`.
    pub fn at(
        buf: &'a [u8],
        pos: usize,
        endian: Endian,
    ) -> Self {
        Self { buf, pos, endian }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Возвращает следующие `len` байт и сдвигает позицию.
    pub fn take(
        &mut self,
        len: usize,
        section: &'static str,
    ) -> IbwResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(IbwError::truncated(section, len, self.remaining()));
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Пропускает `len` байт секции.
    pub fn skip(
        &mut self,
        len: usize,
        section: &'static str,
    ) -> IbwResult<()> {
        self.take(len, section).map(|_| ())
    }

    pub fn read_u8(&mut self) -> IbwResult<u8> {
        Ok(self.take(1, "field")?[0])
    }

    read_fixed!(read_u16, u16, 2, read_u16);
    read_fixed!(read_i16, i16, 2, read_i16);
    read_fixed!(read_u32, u32, 4, read_u32);
    read_fixed!(read_i32, i32, 4, read_i32);
    read_fixed!(read_f32, f32, 4, read_f32);
    read_fixed!(read_f64, f64, 8, read_f64);

    /// Читает строку фиксированной ширины `width`, обрезая по первому нулю.
    ///
    /// Невалидный UTF-8 декодируется как Latin-1.
    pub fn read_cstr(
        &mut self,
        width: usize,
    ) -> IbwResult<String> {
        let b = self.take(width, "string")?;
        Ok(decode_cstr(b))
    }
}

/// Строка до первого нуля; UTF-8 если валиден, иначе Latin-1.
pub fn decode_cstr(b: &[u8]) -> String {
    let end = b.iter().position(|&c| c == 0).unwrap_or(b.len());
    decode_text(&b[..end])
}

/// UTF-8 если валиден, иначе Latin-1.
pub fn decode_text(b: &[u8]) -> String {
    match std::str::from_utf8(b) {
        Ok(s) => s.to_string(),
        Err(_) => b.iter().map(|&c| c as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_both_orders() {
        let buf = [0x01, 0x02, 0x03, 0x04];

        let mut le = ByteCursor::new(&buf, Endian::Little);
        assert_eq!(le.read_u16().unwrap(), 0x0201);
        assert_eq!(le.read_u16().unwrap(), 0x0403);

        let mut be = ByteCursor::new(&buf, Endian::Big);
        assert_eq!(be.read_u32().unwrap(), 0x0102_0304);
        assert!(be.is_empty());
    }

    #[test]
    fn test_floats() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1.5f32.to_be_bytes());
        buf.extend_from_slice(&(-2.25f64).to_be_bytes());

        let mut c = ByteCursor::new(&buf, Endian::Big);
        assert_eq!(c.read_f32().unwrap(), 1.5);
        assert_eq!(c.read_f64().unwrap(), -2.25);
    }

    #[test]
    fn test_bounds_checked() {
        let buf = [0u8; 3];
        let mut c = ByteCursor::new(&buf, Endian::Little);
        c.read_u16().unwrap();

        let err = c.read_u32().unwrap_err();
        assert_eq!(err.kind(), ibw_types::IbwErrorKind::TruncatedSection);
        // позиция не сдвигается при ошибке
        assert_eq!(c.position(), 2);

        assert!(c.skip(2, "note").is_err());
        c.skip(1, "note").unwrap();
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn test_cstr() {
        let buf = *b"nm\0\0V\0\0\0";
        let mut c = ByteCursor::at(&buf, 0, Endian::Little);
        assert_eq!(c.read_cstr(4).unwrap(), "nm");
        assert_eq!(c.read_cstr(4).unwrap(), "V");

        // Latin-1 µ
        assert_eq!(decode_cstr(&[0xB5, b'm', 0]), "µm");
    }
}

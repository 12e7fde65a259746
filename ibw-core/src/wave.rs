//! Заголовок волны версии 5 (WaveHeader5, 320 байт).
//!
//! ```text
//! [0..4]     next             u32  указатель, не используется
//! [4..8]     creation_date    u32
//! [8..12]    mod_date         u32
//! [12..16]   npts             u32
//! [16..18]   type             u16  флаги типа
//! [18..20]   lock             u16
//! [20..26]   whpad1           6 байт
//! [26..28]   wh_version       u16
//! [28..60]   bname            32 байта, строка с нулём
//! [60..64]   whpad2           u32
//! [64..68]   dfolder          u32  указатель
//! [68..84]   n_dim[4]         u32
//! [84..116]  sfA[4]           f64
//! [116..148] sfB[4]           f64
//! [148..152] data_units       4 байта
//! [152..168] dim_units[4]     4 × 4 байта
//! [168..170] fs_valid         u16
//! [170..172] whpad3           u16
//! [172..180] top_full_scale   f64
//! [180..188] bot_full_scale   f64
//! [188..320] зарезервировано
//! ```

use ibw_types::{DataType, IbwResult, WaveHeader5, MAX_DIMS, MAX_UNIT_CHARS, MAX_WAVE_NAME5};
use log::debug;

use crate::{binary::ByteCursor, format::WAVE_SIZE5};

/// Смещение поля типа внутри заголовка волны
pub const WAVE5_TYPE_OFFSET: usize = 16;

/// Размер значимой части заголовка волны, остальное зарезервировано
pub const WAVE5_USED_SIZE: usize = 188;

/// Читает заголовок волны; курсор после вызова стоит за ним.
pub fn read_wave5(cur: &mut ByteCursor<'_>) -> IbwResult<WaveHeader5> {
    let start = cur.position();

    let _next = cur.read_u32()?;
    let creation_date = cur.read_u32()?;
    let mod_date = cur.read_u32()?;
    let npts = cur.read_u32()?;
    let type_flags = cur.read_u16()?;
    debug!("type: {type_flags:#06x}, npts: {npts}");
    let _lock = cur.read_u16()?;
    cur.skip(6, "whpad1")?;
    let wh_version = cur.read_u16()?;
    let name = cur.read_cstr(MAX_WAVE_NAME5 + 1)?;
    debug!("bname: {name}");
    cur.skip(8, "whpad2")?;

    let mut n_dim = [0u32; MAX_DIMS];
    for n in n_dim.iter_mut() {
        *n = cur.read_u32()?;
    }
    debug!("n_dim: {n_dim:?}");

    let mut sf_a = [0.0f64; MAX_DIMS];
    for a in sf_a.iter_mut() {
        *a = cur.read_f64()?;
    }
    let mut sf_b = [0.0f64; MAX_DIMS];
    for b in sf_b.iter_mut() {
        *b = cur.read_f64()?;
    }

    let data_units = cur.read_cstr(MAX_UNIT_CHARS + 1)?;
    let dim_units = [
        cur.read_cstr(MAX_UNIT_CHARS + 1)?,
        cur.read_cstr(MAX_UNIT_CHARS + 1)?,
        cur.read_cstr(MAX_UNIT_CHARS + 1)?,
        cur.read_cstr(MAX_UNIT_CHARS + 1)?,
    ];
    debug!("data_units: <{data_units}>, dim_units: {dim_units:?}");

    let fs_valid = cur.read_u16()? != 0;
    let _whpad3 = cur.read_u16()?;
    let top_full_scale = cur.read_f64()?;
    let bot_full_scale = cur.read_f64()?;

    let used = cur.position() - start;
    cur.skip(WAVE_SIZE5 - used, "wave header")?;

    // Тип проверяем последним: заголовок уже прочитан целиком.
    let data_type = DataType::from_flags(type_flags)?;

    Ok(WaveHeader5 {
        creation_date,
        mod_date,
        npts,
        data_type,
        wh_version,
        name,
        n_dim,
        sf_a,
        sf_b,
        data_units,
        dim_units,
        fs_valid,
        top_full_scale,
        bot_full_scale,
    })
}

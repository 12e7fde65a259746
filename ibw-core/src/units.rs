/// Базовые единицы, которые встречаются в файлах IGOR и не несут приставки.
const BASE_UNITS: &[&str] = &[
    "m", "V", "A", "Hz", "F", "deg", "rad", "s", "N", "W", "K", "C", "Pa", "T", "Ohm", "S", "H",
    "J", "g", "cd", "mol", "Wb", "%", "counts",
];

/// Десятичные приставки СИ.
const PREFIXES: &[(&str, i32)] = &[
    ("Y", 24),
    ("Z", 21),
    ("E", 18),
    ("P", 15),
    ("T", 12),
    ("G", 9),
    ("M", 6),
    ("k", 3),
    ("h", 2),
    ("d", -1),
    ("c", -2),
    ("m", -3),
    ("u", -6),
    ("µ", -6),
    ("μ", -6),
    ("n", -9),
    ("p", -12),
    ("f", -15),
    ("a", -18),
    ("z", -21),
    ("y", -24),
];

/// Единица, разделённая на базовую часть и степень десяти.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUnit {
    pub base: String,
    pub power10: i32,
}

impl ParsedUnit {
    /// Множитель для перевода значений в базовые единицы
    pub fn multiplier(&self) -> f64 {
        10f64.powi(self.power10)
    }
}

/// Разбирает строку единиц вида `nm`, `mV`, `kHz`.
///
/// Неизвестные единицы возвращаются как есть со степенью 0.
pub fn parse_unit(s: &str) -> ParsedUnit {
    let s = s.trim();

    if s.is_empty() || BASE_UNITS.contains(&s) {
        return ParsedUnit {
            base: s.to_string(),
            power10: 0,
        };
    }

    for &(prefix, power10) in PREFIXES {
        if let Some(rest) = s.strip_prefix(prefix) {
            if BASE_UNITS.contains(&rest) {
                return ParsedUnit {
                    base: rest.to_string(),
                    power10,
                };
            }
        }
    }

    ParsedUnit {
        base: s.to_string(),
        power10: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_units_untouched() {
        assert_eq!(parse_unit("m").power10, 0);
        assert_eq!(parse_unit("m").base, "m");
        assert_eq!(parse_unit("deg").base, "deg");
        assert_eq!(parse_unit("").base, "");
        assert_eq!(parse_unit("Pa").power10, 0);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(parse_unit("mV").power10, -3);
        assert_eq!(parse_unit("mV").base, "V");
        assert_eq!(parse_unit("nm").power10, -9);
        assert_eq!(parse_unit("um").base, "m");
        assert_eq!(parse_unit("µm").power10, -6);
        assert_eq!(parse_unit("kHz").power10, 3);
        assert_eq!(parse_unit("pA").power10, -12);
        assert_eq!(parse_unit("mm").base, "m");
    }

    #[test]
    fn test_unknown_kept() {
        let u = parse_unit("arb");
        assert_eq!(u.base, "arb");
        assert_eq!(u.power10, 0);
        assert_eq!(u.multiplier(), 1.0);
    }

    #[test]
    fn test_multiplier() {
        assert!((parse_unit("mV").multiplier() - 1e-3).abs() < 1e-18);
        assert!((parse_unit("nm").multiplier() - 1e-9).abs() < 1e-24);
    }
}

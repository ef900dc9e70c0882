use crate::index::{ByteIndex, Histogram};

/// StrengthMetrics estimates how much keyspace an attacker must search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthMetrics {
    /// log10 of the number of distinct ROM-wide encodings
    pub general_strength: f64,
    /// log10 of the keyspace behind one particular message
    pub file_strength: f64,
    /// Percentage of the 256 byte values the input uses
    pub utilisation: f64,
    pub chars_used: usize,
    pub input_length: u64,
}

/// Compare an input's byte usage against the ROM's.
///
/// Both strengths are sums of logarithms so they never overflow, however large the ROM.
pub fn analyze(rom_counts: &Histogram, input_counts: &Histogram) -> StrengthMetrics {
    let mut general_strength = 0.0;
    let mut file_strength = 0.0;

    for (value, rom_count) in rom_counts.iter_present() {
        let weight = (rom_count as f64).log10();
        general_strength += weight;
        let uses = input_counts.count(value);
        if uses > 0 {
            file_strength += uses as f64 * weight;
        }
    }

    let chars_used = input_counts.distinct();
    StrengthMetrics {
        general_strength,
        file_strength,
        utilisation: chars_used as f64 / 256.0 * 100.0,
        chars_used,
        input_length: input_counts.total(),
    }
}

/// Analyse raw input bytes against an indexed ROM
pub fn analyze_input(index: &ByteIndex, input: &[u8]) -> StrengthMetrics {
    analyze(index.histogram(), &Histogram::from_bytes(input))
}

/// Grade for how many distinct byte values a ROM offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diversity {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Diversity {
    fn grade(distinct: usize) -> Diversity {
        match distinct {
            200.. => Diversity::Excellent,
            150..=199 => Diversity::Good,
            100..=149 => Diversity::Fair,
            _ => Diversity::Poor,
        }
    }
}

/// Grade for how much of printable ASCII a ROM can encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsciiCoverage {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AsciiCoverage {
    fn grade(available: usize) -> AsciiCoverage {
        match available {
            90.. => AsciiCoverage::Excellent,
            70..=89 => AsciiCoverage::Good,
            50..=69 => AsciiCoverage::Fair,
            _ => AsciiCoverage::Poor,
        }
    }
}

/// RomSurvey describes how well suited an indexed ROM region is to encoding
#[derive(Debug, Clone)]
pub struct RomSurvey {
    pub rom_len: usize,
    pub block_count: usize,
    pub scanned: u64,
    pub distinct: usize,
    /// Percentage of the 256 byte values present
    pub coverage: f64,
    pub ascii_available: usize,
    pub ascii_missing: Vec<u8>,
    /// Shannon entropy of the indexed bytes, in bits per byte
    pub entropy: f64,
    /// Up to five `(value, count)` pairs, most frequent first
    pub most_common: Vec<(u8, u64)>,
    /// Up to five `(value, count)` pairs, least frequent first
    pub least_common: Vec<(u8, u64)>,
    pub diversity: Diversity,
    pub ascii_coverage: AsciiCoverage,
}

pub const PRINTABLE_ASCII: std::ops::RangeInclusive<u8> = 0x20..=0x7E;

impl RomSurvey {
    pub fn survey(index: &ByteIndex) -> RomSurvey {
        let h = index.histogram();
        let scanned = h.total();
        let distinct = h.distinct();

        let ascii_missing: Vec<u8> = PRINTABLE_ASCII.filter(|&c| h.count(c) == 0).collect();
        let ascii_available = PRINTABLE_ASCII.count() - ascii_missing.len();

        let mut entropy = 0.0;
        if scanned > 0 {
            for (_, count) in h.iter_present() {
                let p = count as f64 / scanned as f64;
                entropy -= p * p.log2();
            }
        }

        let mut ranked: Vec<(u8, u64)> = h.iter_present().collect();
        // Stable sort keeps ties in byte value order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let most_common: Vec<(u8, u64)> = ranked.iter().take(5).copied().collect();
        let least_common: Vec<(u8, u64)> = ranked.iter().rev().take(5).copied().collect();

        RomSurvey {
            rom_len: index.rom().len(),
            block_count: index.block_count(),
            scanned,
            distinct,
            coverage: distinct as f64 / 256.0 * 100.0,
            ascii_available,
            ascii_missing,
            entropy,
            most_common,
            least_common,
            diversity: Diversity::grade(distinct),
            ascii_coverage: AsciiCoverage::grade(ascii_available),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bittage::Bittage;
    use crate::rom::Rom;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_strength_formulas() {
        let mut rom = Histogram::from_bytes(&[b'A'; 100]);
        for _ in 0..10 {
            rom.add(b'B');
        }
        rom.add(b'C');
        let input = Histogram::from_bytes(b"AAB");
        let m = analyze(&rom, &input);
        // log10(100) + log10(10) + log10(1)
        assert!((m.general_strength - 3.0).abs() < EPSILON);
        // 2 * log10(100) + 1 * log10(10)
        assert!((m.file_strength - 5.0).abs() < EPSILON);
        assert_eq!(m.chars_used, 2);
        assert!((m.utilisation - 2.0 / 256.0 * 100.0).abs() < EPSILON);
        assert_eq!(m.input_length, 3);
    }

    #[test]
    fn test_input_bytes_absent_from_rom_add_nothing() {
        let rom = Histogram::from_bytes(b"AAAA");
        let input = Histogram::from_bytes(b"AZZZ");
        let m = analyze(&rom, &input);
        assert!((m.file_strength - 4f64.log10()).abs() < EPSILON);
        assert_eq!(m.chars_used, 2);
    }

    #[test]
    fn test_empty_input() {
        let rom = Histogram::from_bytes(b"ABAC");
        let m = analyze(&rom, &Histogram::new());
        assert_eq!(m.file_strength, 0.0);
        assert_eq!(m.utilisation, 0.0);
        assert!(m.general_strength.is_finite() && m.general_strength >= 0.0);
    }

    #[test]
    fn test_full_utilisation() {
        let all: Vec<u8> = (0..=255).collect();
        let m = analyze(&Histogram::from_bytes(&all), &Histogram::from_bytes(&all));
        assert_eq!(m.utilisation, 100.0);
        assert_eq!(m.general_strength, 0.0);
    }

    #[test]
    fn test_survey() {
        let mut bytes = b"AAAABBC".to_vec();
        bytes.push(0x00);
        let rom = Rom::new(bytes, Bittage::Bits16).unwrap();
        let index = ByteIndex::build(&rom, &[]);
        let s = RomSurvey::survey(&index);
        assert_eq!(s.scanned, 8);
        assert_eq!(s.distinct, 4);
        assert_eq!(s.ascii_available, 3);
        assert_eq!(s.ascii_missing.len(), 92);
        assert!(!s.ascii_missing.contains(&b'A'));
        assert_eq!(s.most_common[0], (b'A', 4));
        assert_eq!(s.least_common[0], (b'C', 1));
        assert_eq!(s.diversity, Diversity::Poor);
        assert_eq!(s.ascii_coverage, AsciiCoverage::Poor);
        // p = 1/2, 1/4, 1/8, 1/8
        assert!((s.entropy - 1.75).abs() < EPSILON);
    }

    #[test]
    fn test_survey_grades_rich_rom() {
        let bytes: Vec<u8> = (0..=255).cycle().take(1024).collect();
        let rom = Rom::new(bytes, Bittage::Bits16).unwrap();
        let index = ByteIndex::build(&rom, &[]);
        let s = RomSurvey::survey(&index);
        assert_eq!(s.diversity, Diversity::Excellent);
        assert_eq!(s.ascii_coverage, AsciiCoverage::Excellent);
        assert!((s.entropy - 8.0).abs() < EPSILON);
        assert!(s.ascii_missing.is_empty());
    }
}

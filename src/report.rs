use std::fmt::{Display, Error, Formatter};

use crate::bittage::Bittage;
use crate::index::Histogram;
use crate::strength::{AsciiCoverage, Diversity, RomSurvey, StrengthMetrics};

/// Phrase a keyspace of `10^exponent` permutations for people
pub fn describe_magnitude(exponent: f64) -> String {
    let value = 10f64.powf(exponent);
    if exponent < 3.0 {
        format!("~{:.0} permutations", value)
    } else if exponent < 6.0 {
        format!("~{:.1} thousand permutations", value / 1e3)
    } else if exponent < 9.0 {
        format!("~{:.1} million permutations", value / 1e6)
    } else if exponent < 12.0 {
        format!("~{:.1} billion permutations", value / 1e9)
    } else if exponent < 15.0 {
        format!("~{:.1} trillion permutations", value / 1e12)
    } else if exponent < 82.0 {
        format!(
            "More than all atoms in the observable universe (10^{:.0} permutations)",
            exponent
        )
    } else if exponent < 1000.0 {
        format!("Incomprehensibly massive (10^{:.0} permutations)", exponent)
    } else {
        format!(
            "Astronomically secure (10^{:.1}M permutations)",
            exponent / 1e6
        )
    }
}

fn printable(value: u8) -> char {
    if (0x20..=0x7E).contains(&value) {
        value as char
    } else {
        ' '
    }
}

/// StrengthReport is the full strength analysis as printed by the command line tool
pub struct StrengthReport<'a> {
    pub bittage: Bittage,
    pub metrics: StrengthMetrics,
    pub rom_counts: &'a Histogram,
    pub input_counts: &'a Histogram,
}

impl<'a> Display for StrengthReport<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let m = &self.metrics;
        writeln!(f, "ROM Strength Analysis ({})", self.bittage)?;
        writeln!(f, "===============================")?;
        writeln!(f)?;
        writeln!(f, "Input Information:")?;
        writeln!(f, "- Text Length: {} characters", m.input_length)?;
        writeln!(
            f,
            "- Characters Utilized: {} of 256 ({:.1}%)",
            m.chars_used, m.utilisation
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "General ROM Capacity: ~10^{:.0} ({})",
            m.general_strength,
            describe_magnitude(m.general_strength)
        )?;
        writeln!(
            f,
            "This File Security: ~10^{:.0} ({})",
            m.file_strength,
            describe_magnitude(m.file_strength)
        )?;
        writeln!(f)?;
        writeln!(f, "Byte Analysis:")?;
        writeln!(f, "Byte  Dec  ROM Count  Input Count  Char")?;
        writeln!(f, "----  ---  ---------  -----------  ----")?;
        for value in 0..=255u8 {
            let rom = self.rom_counts.count(value);
            let input = self.input_counts.count(value);
            if rom > 0 || input > 0 {
                writeln!(
                    f,
                    "0x{:02X}  {:3}  {:9}  {:11}    {}",
                    value,
                    value,
                    rom,
                    input,
                    printable(value)
                )?;
            }
        }
        Ok(())
    }
}

fn describe_byte(value: u8) -> String {
    if (0x20..=0x7E).contains(&value) {
        format!("'{}'", value as char)
    } else {
        format!("\\x{:02x}", value)
    }
}

impl Display for RomSurvey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        writeln!(
            f,
            "Size: {} bytes ({:.1} KB)",
            self.rom_len,
            self.rom_len as f64 / 1024.0
        )?;
        writeln!(f, "Memory blocks: {}", self.block_count)?;
        writeln!(f)?;
        writeln!(f, "Byte Analysis:")?;
        writeln!(f, "Valid addresses: {}", self.scanned)?;
        writeln!(f, "Unique byte values: {}/256", self.distinct)?;
        writeln!(f, "Coverage: {:.1}%", self.coverage)?;
        writeln!(
            f,
            "ASCII printable characters available: {}/95",
            self.ascii_available
        )?;
        if !self.ascii_missing.is_empty() {
            let missing: String = self.ascii_missing.iter().map(|&c| c as char).collect();
            writeln!(f, "Missing chars: {}", missing)?;
        }

        writeln!(f)?;
        writeln!(f, "Most common bytes:")?;
        for (value, count) in &self.most_common {
            writeln!(f, "  {:3} ({}): {} occurrences", value, describe_byte(*value), count)?;
        }
        writeln!(f)?;
        writeln!(f, "Least common bytes:")?;
        for (value, count) in &self.least_common {
            writeln!(f, "  {:3} ({}): {} occurrences", value, describe_byte(*value), count)?;
        }

        writeln!(f)?;
        writeln!(f, "ZOSCII Suitability Assessment:")?;
        let diversity = match self.diversity {
            Diversity::Excellent => "Excellent byte diversity (200+ unique values)",
            Diversity::Good => "Good byte diversity (150+ unique values)",
            Diversity::Fair => "Fair byte diversity (100+ unique values)",
            Diversity::Poor => "Poor byte diversity (<100 unique values)",
        };
        writeln!(f, "- {}", diversity)?;
        let ascii = match self.ascii_coverage {
            AsciiCoverage::Excellent => "Excellent ASCII coverage (90+ printable chars)",
            AsciiCoverage::Good => "Good ASCII coverage (70+ printable chars)",
            AsciiCoverage::Fair => "Fair ASCII coverage (50+ printable chars)",
            AsciiCoverage::Poor => "Poor ASCII coverage (<50 printable chars)",
        };
        writeln!(f, "- {}", ascii)?;
        write!(f, "Estimated entropy: {:.2} bits per byte", self.entropy)
    }
}

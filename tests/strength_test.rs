// Strength analysis over indexed ROMs and encoder counts
use test_log::test;

use zoscii::report::{describe_magnitude, StrengthReport};
use zoscii::{
    analyze, analyze_input, Bittage, ByteIndex, CharacterMap, Encoder, Histogram, MemoryBlock,
    Profile, Rom, RomSurvey, ZRand,
};

fn sample_rom() -> Rom {
    let bytes: Vec<u8> = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit."
        .iter()
        .cycle()
        .take(4000)
        .copied()
        .collect();
    Rom::new(bytes, Bittage::Bits16).unwrap()
}

#[test]
fn file_strength_matches_its_definition() {
    let rom = sample_rom();
    let index = ByteIndex::build(&rom, &[]);
    let input = b"lorem ipsum, quod erat demonstrandum";
    let metrics = analyze_input(&index, input);

    let input_counts = Histogram::from_bytes(input);
    let mut expected = 0.0;
    for v in 0..=255u8 {
        let (r, i) = (index.histogram().count(v), input_counts.count(v));
        if r > 0 && i > 0 {
            expected += i as f64 * (r as f64).log10();
        }
    }
    assert!((metrics.file_strength - expected).abs() < 1e-9);
    assert!(metrics.file_strength.is_finite() && metrics.file_strength >= 0.0);
    assert!(metrics.general_strength.is_finite() && metrics.general_strength >= 0.0);
    assert!((0.0..=100.0).contains(&metrics.utilisation));
}

#[test]
fn encoder_counts_feed_the_analyzer() {
    let rom = sample_rom();
    let index = ByteIndex::build(&rom, &[]);
    let encoding = Encoder::new(&index, CharacterMap::Identity, 42)
        .encode_str("dolor sit", &mut ZRand::new_predictable(5));
    let metrics = analyze(&encoding.rom_counts, &encoding.input_counts);
    assert_eq!(metrics.input_length, 9);
    assert_eq!(metrics, analyze_input(&index, b"dolor sit"));
}

#[test]
fn blocks_narrow_the_keyspace() {
    let rom = sample_rom();
    let whole = ByteIndex::build(&rom, &[]);
    let part = ByteIndex::build(&rom, &[MemoryBlock::new(0, 1000)]);
    let input = b"amet";
    assert!(analyze_input(&part, input).file_strength < analyze_input(&whole, input).file_strength);
}

#[test]
fn report_and_survey_render() {
    let rom = sample_rom();
    let index = ByteIndex::build(&rom, &[]);
    let input = Histogram::from_bytes(b"sit amet");
    let report = StrengthReport {
        bittage: Bittage::Bits16,
        metrics: analyze(index.histogram(), &input),
        rom_counts: index.histogram(),
        input_counts: &input,
    };
    let text = report.to_string();
    assert!(text.contains("General ROM Capacity"));
    assert!(text.contains("This File Security"));

    let survey = RomSurvey::survey(&index).to_string();
    assert!(survey.contains("Unique byte values"));
    assert!(survey.contains("Estimated entropy"));
    assert!(describe_magnitude(0.0).contains("~1 permutations"));
}

#[test]
fn profile_drives_indexing() {
    let profile = Profile::from_toml_str(
        r#"
        charset = "ascii"
        [[blocks]]
        start = 0
        size = 56
        "#,
    )
    .unwrap();
    let rom = sample_rom();
    let index = ByteIndex::build(&rom, &profile.blocks);
    assert_eq!(index.scanned(), 56);
    let encoding = Encoder::new(&index, profile.charset, profile.unmappable)
        .encode_str("Lorem", &mut ZRand::from_seed(profile.seed));
    assert!(encoding.addresses.iter().all(|&a| a < 56));
}

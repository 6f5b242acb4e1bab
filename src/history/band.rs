/// ADIF band edges in Hz, inclusive.
const BANDS: &[(&str, u64, u64)] = &[
    ("2190M", 135_700, 137_800),
    ("630M", 472_000, 479_000),
    ("160M", 1_800_000, 2_000_000),
    ("80M", 3_500_000, 4_000_000),
    ("60M", 5_060_000, 5_450_000),
    ("40M", 7_000_000, 7_300_000),
    ("30M", 10_100_000, 10_150_000),
    ("20M", 14_000_000, 14_350_000),
    ("17M", 18_068_000, 18_168_000),
    ("15M", 21_000_000, 21_450_000),
    ("12M", 24_890_000, 24_990_000),
    ("10M", 28_000_000, 29_700_000),
    ("6M", 50_000_000, 54_000_000),
    ("4M", 70_000_000, 71_000_000),
    ("2M", 144_000_000, 148_000_000),
    ("1.25M", 222_000_000, 225_000_000),
    ("70CM", 420_000_000, 450_000_000),
    ("33CM", 902_000_000, 928_000_000),
    ("23CM", 1_240_000_000, 1_300_000_000),
];

/// Uppercase band label for a dial frequency, or `""` outside every band.
pub fn band_for_frequency(hz: u64) -> &'static str {
    BANDS
        .iter()
        .find(|(_, low, high)| (*low..=*high).contains(&hz))
        .map(|(label, _, _)| *label)
        .unwrap_or("")
}

use converter_core::ratio::PRESETS;

/// Print the preset aspect ratios, one per line.
pub fn run() {
    for ratio in PRESETS {
        println!("{}", ratio);
    }
}

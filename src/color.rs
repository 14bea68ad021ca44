use palette::{FromColor, Hsl, Srgb};
use plotters::style::RGBColor;

/// First hue of the palette; starts the sequence on blue.
const HUE_OFFSET: f32 = 210.0;

/// `n` distinct line colours with hues spread evenly around the wheel.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    let step = 360.0 / n.max(1) as f32;
    (0..n)
        .map(|i| {
            let hsl = Hsl::new(HUE_OFFSET + i as f32 * step, 0.7, 0.42);
            let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsl).into_format();
            RGBColor(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: series name → RGBColor
// ---------------------------------------------------------------------------

/// Capacity companions are drawn in a neutral grey so the usage line stands out.
pub const CAPACITY_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Pick a colour for every series of a chart, in order.
pub fn series_colors<'a, I>(names: I) -> Vec<RGBColor>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    let regular = names.iter().filter(|n| !n.ends_with(" capacity")).count();
    let mut palette = generate_palette(regular).into_iter();

    names
        .iter()
        .map(|name| {
            if name.ends_with(" capacity") {
                CAPACITY_COLOR
            } else {
                palette.next().unwrap_or(CAPACITY_COLOR)
            }
        })
        .collect()
}

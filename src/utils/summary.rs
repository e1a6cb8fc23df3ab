use crate::models::layer::Layer;
use comfy_table::{Attribute, Cell, CellAlignment, Table};

/// Print the startup layer summary table.
pub fn print_layer_summary(layers: &[Layer]) {
    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center),
            Cell::new("Layer").add_attribute(Attribute::Bold),
            Cell::new("Kind")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center),
            Cell::new("Features")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center),
            Cell::new("Visible")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center),
            Cell::new("Colour").add_attribute(Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED);

    let mut warnings = Vec::new();
    for layer in layers {
        let marker = if layer.is_custom() { "💾" } else { "✅" };
        if layer.features.is_empty() {
            warnings.push(format!(
                "  ⚠️{}: layer has no features and will render nothing",
                layer.id
            ));
        }
        table.add_row(vec![
            Cell::new(marker).set_alignment(CellAlignment::Center),
            Cell::new(&layer.name),
            Cell::new(layer.kind).set_alignment(CellAlignment::Center),
            Cell::new(layer.features.len()).set_alignment(CellAlignment::Center),
            Cell::new(if layer.visible { "yes" } else { "no" })
                .set_alignment(CellAlignment::Center),
            Cell::new(colour_swatch(&layer.color)),
        ]);
    }

    println!("\nLayer summary:\n{}", table);

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for warning in warnings {
            println!("{}", warning);
        }
    }

    println!();
}

/// Render a `#rrggbb` display colour as a true-colour terminal swatch,
/// falling back to the raw string when it does not parse.
fn colour_swatch(color: &str) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => format!("\x1b[38;2;{};{};{}m██████\x1b[0m {}", r, g, b, color),
        None => color.to_string(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_accepts_display_colours() {
        assert_eq!(parse_hex("#ef4444"), Some((0xef, 0x44, 0x44)));
        assert_eq!(parse_hex("#3b82f6"), Some((0x3b, 0x82, 0xf6)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert_eq!(parse_hex("red"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }
}

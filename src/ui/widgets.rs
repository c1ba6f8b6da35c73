use bevy_egui::egui;

/// Parse a numeric text field: non-numeric input falls back to the range
/// minimum, everything else is rounded and clamped into [min, max].
pub fn parse_clamped(text: &str, min: i32, max: i32) -> i32 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map_or(min, |v| {
            (v.round() as i64).clamp(min as i64, max as i64) as i32
        })
}

/// A linked slider + number field. Slider edits mirror into the text
/// buffer immediately; committing the text field (enter / focus loss)
/// parses, clamps, and writes back to both controls. Returns true when the
/// edit should trigger a regeneration (slider release or a text commit
/// that changed the value).
pub fn paired_input(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut i32,
    text: &mut String,
    min: i32,
    max: i32,
) -> bool {
    let mut committed = false;
    ui.label(label);
    ui.horizontal(|ui| {
        let slider = ui.add(egui::Slider::new(value, min..=max).show_value(false));
        if slider.changed() {
            *text = value.to_string();
        }
        if slider.drag_stopped() {
            committed = true;
        }

        let edit = ui.add(egui::TextEdit::singleline(text).desired_width(48.0));
        if edit.lost_focus() {
            let parsed = parse_clamped(text, min, max);
            if parsed != *value {
                *value = parsed;
                committed = true;
            }
            *text = parsed.to_string();
        }
    });
    committed
}

/// Exclusive outline/filled mode chips. Returns true when the mode
/// actually switched.
pub fn mode_chips(ui: &mut egui::Ui, filled: &mut bool) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        if ui.selectable_label(!*filled, "Outline").clicked() && *filled {
            *filled = false;
            changed = true;
        }
        if ui.selectable_label(*filled, "Filled").clicked() && !*filled {
            *filled = true;
            changed = true;
        }
    });
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_input_falls_back_to_minimum() {
        assert_eq!(parse_clamped("", 1, 200), 1);
        assert_eq!(parse_clamped("abc", 1, 200), 1);
        assert_eq!(parse_clamped("NaN", 1, 200), 1);
        assert_eq!(parse_clamped("inf", 5, 200), 5);
    }

    #[test]
    fn values_are_rounded_and_clamped() {
        assert_eq!(parse_clamped("12", 1, 200), 12);
        assert_eq!(parse_clamped("  12.6 ", 1, 200), 13);
        assert_eq!(parse_clamped("12.4", 1, 200), 12);
        assert_eq!(parse_clamped("-40", 1, 200), 1);
        assert_eq!(parse_clamped("9999", 1, 200), 200);
        assert_eq!(parse_clamped("1e12", 1, 200), 200);
    }

    #[test]
    fn any_edit_sequence_converges_to_one_clamped_value() {
        // Both controls end up holding the same integer after write-back.
        let edits = ["3", "250", "x", "17.5", "-2"];
        let mut value = 10;
        for edit in edits {
            value = parse_clamped(edit, 1, 200);
            let text = value.to_string();
            assert_eq!(parse_clamped(&text, 1, 200), value);
            assert!((1..=200).contains(&value));
        }
        assert_eq!(value, 1);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Integration tests to validate style and design token coherence.

#[cfg(test)]
mod tests {
    use iced::Theme;
    use plant_doctor::diagnosis::{Confidence, ConfidenceTier};
    use plant_doctor::ui::design_tokens::{palette, sizing, spacing};
    use plant_doctor::ui::styles::{button, container};
    use plant_doctor::ui::theming::ThemeMode;

    #[test]
    fn all_button_styles_compile() {
        let theme = Theme::Dark;
        let status = iced::widget::button::Status::Active;

        let _ = button::primary(&theme, status);
        let _ = button::secondary(&theme, status);
        let _ = button::overlay_round(&theme, status);
        let _ = button::ghost(&theme, status);
    }

    #[test]
    fn container_styles_follow_theme() {
        let light = container::card(&Theme::Light);
        let dark = container::card(&Theme::Dark);
        assert_ne!(light.background, dark.background);

        let idle = container::drop_zone(false)(&Theme::Light);
        let hover = container::drop_zone(true)(&Theme::Light);
        assert_ne!(idle.background, hover.background);
    }

    #[test]
    fn tier_colors_are_distinct() {
        let colors = [90, 75, 60, 10].map(|v| Confidence::new(v).tier().color());
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(ConfidenceTier::High.color(), palette::TIER_HIGH);
    }

    #[test]
    fn layout_tokens_are_ordered() {
        assert!(spacing::XS < spacing::MD && spacing::MD < spacing::LG);
        assert!(sizing::TOAST_WIDTH < sizing::CONTENT_WIDTH);
    }

    #[test]
    fn theming_switches_correctly() {
        let light = ThemeMode::Light.colors();
        let dark = ThemeMode::Dark.colors();

        // Surface colors should be visually opposite between light and dark
        assert!(light.surface_primary.r > dark.surface_primary.r);

        // Text colors should also be opposite between light and dark
        assert!(light.text_primary.r < dark.text_primary.r);
    }
}

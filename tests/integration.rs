// SPDX-License-Identifier: MPL-2.0
use image_rs::{ImageFormat, Rgb, RgbImage};
use plant_doctor::acquisition::{self, ImageOrigin};
use plant_doctor::app::config::{self, AnalysisConfig, Config};
use plant_doctor::diagnosis::analyzer::{Analyzer, MockAnalyzer, MOCK_NAME};
use plant_doctor::diagnosis::{ConfidenceTier, DiagnosisResult, ResultIcon};
use plant_doctor::i18n::fluent::I18n;
use plant_doctor::ui::acquisition::{Effect, Message, State};
use std::io::Cursor;
use tempfile::tempdir;

fn leaf_png() -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 6, Rgb([40, 160, 60]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

#[test]
fn dropped_file_flows_through_to_a_diagnosis() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("tomato.png");
    std::fs::write(&path, leaf_png()).expect("write image");

    let mut state = State::new();
    let Effect::LoadFile {
        origin: ImageOrigin::Drop,
        generation,
        ..
    } = state.handle_message(Message::FileDropped(path.clone()))
    else {
        panic!("dropping an image should start a load");
    };

    let loaded = acquisition::load_path(&path, ImageOrigin::Drop).expect("load image");
    let effect = state.handle_message(Message::ImageLoaded {
        name: "tomato.png".into(),
        generation,
        result: Ok(loaded),
    });
    assert!(matches!(effect, Effect::ImageSelected { width: 8, height: 6, .. }));

    let Effect::Analyze(source) = state.handle_message(Message::Submit) else {
        panic!("submit should request an analysis");
    };
    assert!(state.is_analyzing());

    let analyzer = MockAnalyzer::seeded(7, &AnalysisConfig::default());
    let result = analyzer.analyze(&source).expect("analysis");
    assert_eq!(result.name(), MOCK_NAME);
    assert!((60.0..=100.0).contains(&result.confidence().value()));
}

#[test]
fn non_image_drop_is_ignored() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not a picture").expect("write file");

    assert!(acquisition::load_path(&path, ImageOrigin::Drop)
        .expect("skip")
        .is_none());
}

#[test]
fn service_payload_with_missing_fields_renders_defaults() {
    let result = DiagnosisResult::from_json(r#"{"confidence": 78}"#).expect("parse");
    assert_eq!(result.name(), "Unknown Plant");
    assert_eq!(result.description(), "No description available");
    assert_eq!(result.treatment(), "No treatment information available");
    assert_eq!(result.tier(), ConfidenceTier::Medium);
    assert_eq!(result.icon(), ResultIcon::Warning);
}

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    let mut french_config = Config::default();
    french_config.general.language = Some("fr".to_string());
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");

    let loaded_french_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, None, &loaded_french_config);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("acquisition-select-button"), "Choisir une image");
}

#[test]
fn analysis_range_from_config_is_respected() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(
        dir.path().join("settings.toml"),
        "[analysis]\nmin_confidence = 95\nmax_confidence = 97\n",
    )
    .expect("write config");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let analyzer = MockAnalyzer::seeded(1, &config.analysis);
    let source = acquisition::prepare(ImageOrigin::File, "leaf.png", "image/png", leaf_png())
        .expect("decode")
        .expect("image");
    for _ in 0..20 {
        let confidence = analyzer.analyze(&source).expect("analysis").confidence();
        assert!((95.0..=97.0).contains(&confidence.value()));
        assert_eq!(confidence.tier(), ConfidenceTier::High);
    }
}

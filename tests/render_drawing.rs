//! Rendering tests: solve sample instruments and render them to SVG.

use neckdraft::{
    parse_request, render_cross_section, render_drawing, render_json, render_json_to_svg,
    render_radius_template, solve_geometry, solve_json, DrawingOptions, Error, FamilyInputs,
    InstrumentParameters, View,
};
use std::path::PathBuf;

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn texts(svg: &str) -> Vec<String> {
    let doc = roxmltree::Document::parse(svg).expect("SVG should be well-formed XML");
    doc.descendants()
        .filter(|n| n.has_tag_name("text"))
        .filter_map(|n| n.text().map(str::to_string))
        .collect()
}

fn render_default(options: &DrawingOptions) -> String {
    let params = InstrumentParameters::default();
    let derived = solve_geometry(&params).unwrap();
    render_drawing(&params, &derived, options)
}

#[test]
fn render_violin_side_view() {
    let svg = render_default(&DrawingOptions {
        show_measurements: true,
        footer: Some("https://example.org/neckdraft".into()),
    });

    let doc = roxmltree::Document::parse(&svg).expect("SVG should be well-formed XML");
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert!(root.attribute("width").unwrap().ends_with("mm"));
    assert!(root.attribute("viewBox").is_some());
    assert!(doc.descendants().any(|n| n.attribute("id") == Some("diagonalHatch")));
    assert!(svg.contains(r#"<g transform="scale(1,-1)">"#));

    let labels = texts(&svg);
    assert!(labels.contains(&"My Instrument".to_string()), "title missing: {labels:?}");
    assert!(labels.contains(&"https://example.org/neckdraft".to_string()));
    // Neck angle, string length and body length are all annotated.
    let derived = solve_geometry(&InstrumentParameters::default()).unwrap();
    assert!(labels.contains(&format!("{:.1}°", derived.neck_angle)));
    assert!(labels.contains(&"325.0".to_string()));
    assert!(labels.contains(&"355.0".to_string()));
    assert!(svg.contains(r#"fill="url(#diagonalHatch)""#));
    assert!(svg.contains("rgb(255,0,0)"));
    // Title and measurement labels sit on the blue text layer.
    assert!(svg.contains(r#"fill="rgb(0,0,255)">My Instrument</text>"#));

    let out = output_dir().join("violin_side.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
    println!("✓ Rendered violin_side.svg ({} bytes)", svg.len());
}

#[test]
fn hidden_measurements_leave_only_the_title() {
    let svg = render_default(&DrawingOptions {
        show_measurements: false,
        footer: None,
    });

    assert_eq!(texts(&svg), vec!["My Instrument".to_string()]);
    assert!(!svg.contains("rgb(255,0,0)"));
    // Outline still drawn.
    assert!(svg.contains(r#"stroke="rgb(0,0,0)""#));
}

#[test]
fn render_viol_with_tailpiece_and_back_break() {
    let params = InstrumentParameters {
        instrument_name: "Viol & <friends>".into(),
        vsl: 690.0,
        body_length: 480.0,
        rib_height: 100.0,
        arching_height: 25.0,
        bridge_height: 80.0,
        overstand: 20.0,
        tailpiece_height: 12.0,
        fingerboard_length: 450.0,
        fingerboard_radius: 90.0,
        fingerboard_width_at_nut: 50.0,
        fingerboard_width_at_end: 75.0,
        family: FamilyInputs::BowedBodyStop {
            body_stop: 280.0,
            string_height_eof: 7.0,
            no_frets: 7,
            break_angle: 15.0,
            top_block_height: 40.0,
        },
        ..InstrumentParameters::default()
    };
    let derived = solve_geometry(&params).unwrap();
    let svg = render_drawing(&params, &derived, &DrawingOptions::default());

    let labels = texts(&svg);
    assert!(labels.contains(&"Viol & <friends>".to_string()));
    assert!(labels.contains(&"12.0".to_string()), "tailpiece height missing");
    assert!(labels.contains(&format!("{:.1}°", derived.string_break_angle)));

    std::fs::write(output_dir().join("viol_side.svg"), &svg).expect("Failed to write SVG");
}

#[test]
fn render_cross_section_view() {
    let params = InstrumentParameters {
        neck_width_at_top_of_ribs: 24.0,
        fingerboard_width_at_end: 42.0,
        ..InstrumentParameters::default()
    };
    let derived = solve_geometry(&params).unwrap();
    let svg = render_cross_section(&params, &derived, &DrawingOptions::default());

    let labels = texts(&svg);
    assert!(labels.contains(&format!("{:.1}", derived.neck_block_max_width)));
    assert!(labels.contains(&"42.0".to_string()));
    assert!(labels.contains(&"28.0".to_string()), "button width missing");
    assert!(svg.contains("rgb(230,210,180)"));

    std::fs::write(output_dir().join("violin_cross_section.svg"), &svg)
        .expect("Failed to write SVG");
}

#[test]
fn json_request_renders_with_defaults() {
    let json = r#"{
        "parameters": {
            "instrument_name": "Mandolin",
            "instrument_family": "FrettedBodyJoin",
            "vsl": 350.0,
            "body_length": 330.0,
            "fingerboard_length": 280.0,
            "overstand": 6.0,
            "bridge_height": 18.0,
            "arching_height": 10.0
        },
        "options": { "show_measurements": true }
    }"#;
    let svg = render_json_to_svg(json).expect("mandolin should render");
    assert!(texts(&svg).contains(&"Mandolin".to_string()));

    let derived: serde_json::Value = serde_json::from_str(&solve_json(json).unwrap()).unwrap();
    assert_eq!(derived["fret_positions"].as_array().unwrap().len(), 20);
    assert!(derived["neck_angle"].as_f64().unwrap() > 0.0);
}

#[test]
fn render_radius_template_view() {
    let params = InstrumentParameters::default();
    let svg = render_radius_template(&params).expect("default violin template");

    let doc = roxmltree::Document::parse(&svg).expect("SVG should be well-formed XML");
    assert_eq!(doc.root_element().attribute("width"), Some("80.000mm"));
    assert_eq!(texts(&svg), vec!["41mm".to_string()]);

    std::fs::write(output_dir().join("violin_radius_template.svg"), &svg)
        .expect("Failed to write SVG");
}

#[test]
fn radius_template_through_json() {
    let json = r#"{ "parameters": { "fingerboard_radius": 250.0, "fingerboard_width_at_end": 56.0 } }"#;
    let svg = render_json(json, View::RadiusTemplate).unwrap();
    assert!(texts(&svg).contains(&"250mm".to_string()));

    let too_small = r#"{ "parameters": { "fingerboard_radius": 20.0 } }"#;
    let err = render_json(too_small, View::RadiusTemplate).unwrap_err();
    assert!(matches!(err, Error::Geometry(_)));
}

#[test]
fn partial_parameters_without_family_render_a_violin() {
    let json = r#"{"parameters": {"vsl": 330}}"#;
    let request = parse_request(json).expect("family defaults to the violin");
    assert_eq!(request.parameters.vsl, 330.0);
    assert_eq!(request.parameters.family, FamilyInputs::default());

    let svg = render_json_to_svg(json).unwrap();
    assert!(texts(&svg).contains(&"330.0".to_string()));
}

#[test]
fn empty_request_uses_the_default_violin() {
    let svg = render_json_to_svg("{}").unwrap();
    assert!(texts(&svg).contains(&"My Instrument".to_string()));
}

#[test]
fn malformed_json_is_an_invalid_parameters_error() {
    let err = render_json_to_svg("{ not json").unwrap_err();
    assert!(matches!(err, Error::InvalidParameters(_)));
}

#[test]
fn impossible_geometry_surfaces_through_json() {
    let json = r#"{ "parameters": { "instrument_family": "FrettedBodyJoin", "bridge_height": 2000.0 } }"#;
    let err = render_json_to_svg(json).unwrap_err();
    assert!(matches!(err, Error::Geometry(_)));
    assert!(err.to_string().contains("impossible geometry"));
}

//! End-to-end extraction and classification tests
//!
//! Tests cover:
//! - Exact decimal round trip and range validation
//! - Hemisphere sign law across Latin and Cyrillic notations
//! - Sentence-bounded context and label extraction
//! - Mixed notations in one text
//! - Geometry classification thresholds
//! - Concurrent use of one service from many threads

use approx::assert_relative_eq;
use geotext_cp::extractor::convert_to_decimal;
use geotext_cp::{CoordinateExtractor, CoordinateService, GeometryType};

fn extract(text: &str) -> Vec<geotext_cp::Coordinate> {
    CoordinateExtractor::new().extract(text)
}

// =============================================================================
// Decimal Pairs and Validation
// =============================================================================

#[test]
fn test_decimal_pairs_round_trip() {
    let samples = [
        (55.7558, 37.6173),
        (-33.8688, 151.2093),
        (90.0, -180.0),
        (-90.0, 180.0),
        (0.5, -0.25),
        (12.000001, -45.999999),
    ];

    for (lat, lon) in samples {
        let text = format!("{} {}", fmt(lat), fmt(lon));
        let coords = extract(&text);
        assert_eq!(coords.len(), 1, "input {:?}", text);
        assert_eq!(coords[0].latitude, lat, "input {:?}", text);
        assert_eq!(coords[0].longitude, lon, "input {:?}", text);
    }
}

/// Format with a mandatory fractional part so the decimal notation applies
fn fmt(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

#[test]
fn test_out_of_range_never_emitted() {
    for text in ["91.0 10.0", "-91.5 10.0", "10.0 180.5", "10.0 -999.0", "N95.0 E10.0", "S10.0 W181.0"] {
        assert!(extract(text).is_empty(), "input {:?} should yield nothing", text);
    }
}

#[test]
fn test_out_of_range_does_not_hide_neighbours() {
    let coords = extract("bad 95.0 10.0 and good 45.0 10.0");
    assert_eq!(coords.len(), 1);
    assert_eq!(coords[0].latitude, 45.0);
}

// =============================================================================
// Hemisphere Sign Law
// =============================================================================

#[test]
fn test_sign_law_formula() {
    for &(d, m, s) in &[(0.0, 0.0, 0.0), (55.0, 45.0, 0.0), (40.0, 26.0, 46.0), (179.0, 59.0, 59.9)] {
        let magnitude = d + m / 60.0 + s / 3600.0;
        for h in ["N", "E", "С", "В"] {
            assert_eq!(convert_to_decimal(d, m, s, h), magnitude);
        }
        for h in ["S", "W", "Ю", "З"] {
            assert_eq!(convert_to_decimal(d, m, s, h), -magnitude);
        }
    }
}

#[test]
fn test_hemisphere_prefixed_all_quadrants() {
    let cases = [
        ("N55.75 E37.61", 55.75, 37.61),
        ("S55.75 E37.61", -55.75, 37.61),
        ("N55.75 W37.61", 55.75, -37.61),
        ("s55.75 w37.61", -55.75, -37.61),
    ];
    for (text, lat, lon) in cases {
        let coords = extract(text);
        assert_eq!(coords.len(), 1, "input {:?}", text);
        assert_eq!((coords[0].latitude, coords[0].longitude), (lat, lon), "input {:?}", text);
    }
}

#[test]
fn test_degree_hyphen_minute_south_west() {
    let coords = extract("Waypoint 33-51.6S 151-12.4W reached");
    assert_eq!(coords.len(), 1);
    assert_relative_eq!(coords[0].latitude, -(33.0 + 51.6 / 60.0), epsilon = 1e-9);
    assert_relative_eq!(coords[0].longitude, -(151.0 + 12.4 / 60.0), epsilon = 1e-9);
}

#[test]
fn test_compact_notation() {
    let coords = extract("Fix 5545N 03737E logged");
    assert_eq!(coords.len(), 1);
    assert_relative_eq!(coords[0].latitude, 55.75, epsilon = 1e-9);
    assert_relative_eq!(coords[0].longitude, 37.0 + 37.0 / 60.0, epsilon = 1e-9);
}

#[test]
fn test_cyrillic_labels() {
    let coords = extract("Объект: 33°52' ю.ш 70°30' з.д");
    assert_eq!(coords.len(), 1);
    assert_relative_eq!(coords[0].latitude, -(33.0 + 52.0 / 60.0), epsilon = 1e-9);
    assert_relative_eq!(coords[0].longitude, -70.5, epsilon = 1e-9);

    let coords = extract("Объект: 55°45' С.Ш 37°37' В.Д");
    assert_eq!(coords.len(), 1);
    assert_relative_eq!(coords[0].latitude, 55.75, epsilon = 1e-9);
    assert!(coords[0].longitude > 0.0);
}

#[test]
fn test_cyrillic_labels_with_trailing_dot() {
    let coords = extract("Объект: 33°52' ю.ш. 70°30' з.д.");
    assert_eq!(coords.len(), 1);
    assert_relative_eq!(coords[0].latitude, -(33.0 + 52.0 / 60.0), epsilon = 1e-9);
    assert_relative_eq!(coords[0].longitude, -70.5, epsilon = 1e-9);
    assert_eq!(coords[0].original_text, "33°52' ю.ш. 70°30' з.д.");

    let coords = extract("Штаб: 55°45' с.ш. 37°37' в.д. на карте");
    assert_eq!(coords.len(), 1);
    assert_relative_eq!(coords[0].latitude, 55.75, epsilon = 1e-9);
    assert_relative_eq!(coords[0].longitude, 37.0 + 37.0 / 60.0, epsilon = 1e-9);
}

#[test]
fn test_comma_between_halves() {
    let coords = extract("Point A 55°45'S, 37°37'W reached");
    assert_eq!(coords.len(), 1);
    assert_relative_eq!(coords[0].latitude, -55.75, epsilon = 1e-9);
    assert_relative_eq!(coords[0].longitude, -(37.0 + 37.0 / 60.0), epsilon = 1e-9);
    assert_eq!(coords[0].original_text, "55°45'S, 37°37'W");
    assert_eq!(coords[0].name, "A");

    let coords = extract("Summit at 40°26'46'N, 79°58'56'W");
    assert_eq!(coords.len(), 1);
    assert_relative_eq!(coords[0].longitude, -(79.0 + 58.0 / 60.0 + 56.0 / 3600.0), epsilon = 1e-9);
}

#[test]
fn test_full_dms() {
    let coords = extract("Summit at 40°26'46'N 79°58'56'W");
    assert_eq!(coords.len(), 1);
    assert_relative_eq!(coords[0].latitude, 40.0 + 26.0 / 60.0 + 46.0 / 3600.0, epsilon = 1e-9);
    assert_relative_eq!(coords[0].longitude, -(79.0 + 58.0 / 60.0 + 56.0 / 3600.0), epsilon = 1e-9);
}

#[test]
fn test_comma_decimal_pair() {
    let coords = extract("Координаты 55,7558; 37,6173° получены");
    assert_eq!(coords.len(), 1);
    assert_eq!(coords[0].latitude, 55.7558);
    assert_eq!(coords[0].longitude, 37.6173);
    assert_eq!(coords[0].original_text, "55,7558; 37,6173°");
}

// =============================================================================
// Fallback Decoding (known limitation)
// =============================================================================

#[test]
fn test_fallback_takes_first_two_numbers() {
    // Without hemisphere letters the degree/minute split is ambiguous; the
    // generic rule reads the first two numbers as lat/lon
    let coords = extract("grid 12 34 56 78");
    assert_eq!(coords.len(), 1);
    assert_eq!((coords[0].latitude, coords[0].longitude), (12.0, 34.0));
}

#[test]
fn test_lone_number_ignored() {
    assert!(extract("It was 25 degrees outside").is_empty());
}

// =============================================================================
// Context and Names
// =============================================================================

#[test]
fn test_context_is_single_sentence() {
    let text = "We left at dawn. The camp is at 55.7558 37.6173 near water. Then we rested!";
    let coords = extract(text);
    assert_eq!(coords.len(), 1);
    assert_eq!(coords[0].context, "The camp is at 55.7558 37.6173 near water.");
}

#[test]
fn test_labelled_scenario() {
    let result = CoordinateService::new().process("Точка A: 55°45'N 37°37'E — наблюдательный пункт");
    assert_eq!(result.total_coordinates, 1);
    assert_eq!(result.geometry_type, GeometryType::Point);

    let coord = &result.coordinates[0];
    assert_relative_eq!(coord.latitude, 55.75, epsilon = 1e-9);
    assert_relative_eq!(coord.longitude, 37.617, epsilon = 1e-3);
    assert_eq!(coord.name, "A");
    assert!(coord.is_valid);
}

#[test]
fn test_label_keywords() {
    for (text, name) in [
        ("Target X7 at 10.5 20.5", "X7"),
        ("цель Альфа 10.5 20.5", "Альфа"),
        ("Угол 3: 10.5 20.5", "3"),
        ("POINT north 10.5 20.5", "north"),
        ("Plain 10.5 20.5", ""),
    ] {
        let coords = extract(text);
        assert_eq!(coords.len(), 1, "input {:?}", text);
        assert_eq!(coords[0].name, name, "input {:?}", text);
    }
}

// =============================================================================
// Mixed Notations
// =============================================================================

#[test]
fn test_mixed_decimal_and_dms() {
    let text = "Base camp is at 55.7558 37.6173. Target B is at 40°26'46'N 79°58'56'W.";
    let result = CoordinateService::new().process(text);

    assert_eq!(result.total_coordinates, 2);
    assert_eq!(result.geometry_type, GeometryType::Line);

    let base = &result.coordinates[0];
    assert_eq!((base.latitude, base.longitude), (55.7558, 37.6173));
    assert_eq!(base.context, "Base camp is at 55.7558 37.6173.");
    assert_eq!(base.name, "");

    let target = &result.coordinates[1];
    assert_relative_eq!(target.latitude, 40.446111, epsilon = 1e-6);
    assert_relative_eq!(target.longitude, -79.982222, epsilon = 1e-6);
    assert_eq!(target.context, "Target B is at 40°26'46'N 79°58'56'W.");
    assert_eq!(target.name, "B");
}

#[test]
fn test_mixed_order_independent() {
    let forward = extract("40°26'46'N 79°58'56'W then 55.7558 37.6173");
    let reverse = extract("55.7558 37.6173 then 40°26'46'N 79°58'56'W");
    assert_eq!(forward.len(), 2);
    assert_eq!(reverse.len(), 2);
}

// =============================================================================
// Geometry Classification
// =============================================================================

#[test]
fn test_geometry_from_text() {
    let service = CoordinateService::new();

    assert_eq!(service.process("no coordinates").geometry_type, GeometryType::None);
    assert_eq!(service.process("0.0 0.0").geometry_type, GeometryType::Point);
    assert_eq!(
        service.process("0.0 0.0 then 10.0 10.0").geometry_type,
        GeometryType::Line
    );
    assert_eq!(
        service.process("0.0 0.0 then 5.0 5.0 then 20.0 20.0").geometry_type,
        GeometryType::Line
    );
    assert_eq!(
        service
            .process("10.0 10.0 then 15.0 10.0 then 15.0 15.0 then 10.0005 10.0005")
            .geometry_type,
        GeometryType::Polygon
    );
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_processing() {
    let service = CoordinateService::new();
    let text = "Target B is at 40°26'46'N 79°58'56'W. Base at 55.7558 37.6173.";
    let expected = service.process(text);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| service.process(text)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

use fanplot::data::sampler::{sample, sample_count_for_width, value_at, CurveSource};
use fanplot::data::series::{PerfPoint, SeriesDescriptor, SeriesKey};
use fanplot::{AxisWindow, Domain, SamplingConfig, SplineModel};

fn airflow() -> SplineModel {
    SplineModel::new(
        vec![800.0, 1900.0, 3000.0],
        vec![70.0, 160.0, 240.0],
        vec![0.084, 0.077, 0.070],
    )
}

#[test]
fn samples_stay_inside_window_and_model_domain() {
    let m = airflow();
    let cases: [(f64, f64); 5] = [
        (0.0, 5000.0),
        (1000.0, 2000.0),
        (500.0, 1200.0),
        (2500.0, 9000.0),
        (800.0, 3000.0),
    ];
    for (x_min, x_max) in cases {
        let lo = x_min.max(800.0);
        let hi = x_max.min(3000.0);
        let pts = sample(Some(&m), x_min, x_max, 37);
        assert_eq!(pts.len(), 37);
        for p in &pts {
            assert!(p[0] >= lo && p[0] <= hi, "{p:?} outside [{lo}, {hi}]");
        }
        assert_eq!(pts.first().unwrap()[0], lo);
        assert_eq!(pts.last().unwrap()[0], hi);
    }
}

#[test]
fn nothing_to_sample() {
    let m = airflow();
    assert!(sample(None, 0.0, 10.0, 20).is_empty());
    assert!(sample(Some(&m), 2000.0, 1000.0, 20).is_empty());
    assert!(sample(Some(&m), 4000.0, 5000.0, 20).is_empty());
    assert!(sample(Some(&m), 1000.0, 2000.0, 0).is_empty());
    assert!(sample(Some(&SplineModel::default()), 0.0, 1.0, 20).is_empty());
}

#[test]
fn degenerate_window_yields_one_point() {
    let pts = sample(Some(&airflow()), 1900.0, 1900.0, 20);
    assert_eq!(pts.len(), 1);
    assert!((pts[0][1] - 160.0).abs() < 1e-9);
}

#[test]
fn sample_count_follows_plot_width() {
    let cfg = SamplingConfig::default();
    assert_eq!(cfg.count_for_width(0.0), 20);
    assert_eq!(cfg.count_for_width(200.0), 20);
    assert_eq!(cfg.count_for_width(600.0), 30);
    assert_eq!(cfg.count_for_width(1000.0), 50);
    assert_eq!(cfg.count_for_width(4000.0), 50);
    assert_eq!(cfg.count_for_width(f32::NAN), 20);
    assert_eq!(sample_count_for_width(100.0, 0.0, 5, 8), 5);
}

#[test]
fn value_at_hides_missing_data() {
    assert_eq!(value_at(None, 1.0), None);
    assert!(value_at(Some(&airflow()), 1900.0).is_some());
}

fn series_with(models: impl FnOnce(&mut SeriesDescriptor)) -> SeriesDescriptor {
    let mut s = SeriesDescriptor::new(SeriesKey::new("fan", "free"), "Fan");
    s.points = vec![
        PerfPoint {
            rpm: 1000.0,
            noise_db: 30.0,
            airflow: 80.0,
        },
        PerfPoint {
            rpm: 2000.0,
            noise_db: 40.0,
            airflow: 160.0,
        },
    ];
    models(&mut s);
    s
}

#[test]
fn curve_source_prefers_forward_model() {
    let s = series_with(|s| s.models.rpm_to_airflow = Some(airflow()));
    assert!(matches!(
        CurveSource::for_series(&s, Domain::Rpm),
        CurveSource::Forward(_)
    ));
}

#[test]
fn noise_curve_composes_through_rpm() {
    let s = series_with(|s| {
        s.models.rpm_to_airflow = Some(airflow());
        s.models.noise_to_rpm = Some(SplineModel::new(
            vec![25.0, 48.0],
            vec![800.0, 3000.0],
            vec![95.65, 95.65],
        ));
    });
    let src = CurveSource::for_series(&s, Domain::NoiseDb);
    assert!(matches!(src, CurveSource::Composed { .. }));
    assert_eq!(src.domain(), Some((25.0, 48.0)));
    let at_max = src.value_at(48.0).unwrap();
    assert!((at_max - 240.0).abs() < 1e-6);

    let pts = src.sample(AxisWindow::new(0.0, 100.0), 20);
    assert_eq!(pts.len(), 20);
    assert!(pts.iter().all(|p| p[0] >= 25.0 && p[0] <= 48.0));
}

#[test]
fn raw_points_when_no_model_exists() {
    let s = series_with(|_| {});
    let src = CurveSource::for_series(&s, Domain::NoiseDb);
    assert!(matches!(src, CurveSource::Raw(_)));
    assert_eq!(src.value_at(35.0), Some(120.0));
    assert_eq!(src.sample(AxisWindow::new(0.0, 35.0), 50), vec![[30.0, 80.0]]);

    let empty = SeriesDescriptor::new(SeriesKey::new("x", "y"), "Empty");
    assert!(matches!(
        CurveSource::for_series(&empty, Domain::Rpm),
        CurveSource::Empty
    ));
}

use fanplot::data::dataset::SpectrumEntry;
use fanplot::sync::CurveFrame;
use fanplot::{
    AxisWindow, ChartEvent, ChartSurface, Dataset, Domain, FanPlotConfig, Redraw,
    SeriesDescriptor, SeriesKey, SpectrumFrame, SpectrumModel, SplineModel, SyncController,
    SyncState,
};

#[derive(Default)]
struct Recorder {
    curves: Vec<(CurveFrame, Redraw)>,
    spectra: Vec<SpectrumFrame>,
}

impl Recorder {
    fn clear(&mut self) {
        self.curves.clear();
        self.spectra.clear();
    }
}

impl ChartSurface for Recorder {
    fn draw_curves(&mut self, frame: &CurveFrame, redraw: Redraw) {
        self.curves.push((frame.clone(), redraw));
    }

    fn draw_spectrum(&mut self, frame: &SpectrumFrame) {
        self.spectra.push(frame.clone());
    }
}

fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> SplineModel {
    let slope = (y1 - y0) / (x1 - x0);
    SplineModel::new(vec![x0, x1], vec![y0, y1], vec![slope, slope])
}

fn fan(id: &str, name: &str, rpm: (f64, f64), noise: (f64, f64), airflow: (f64, f64)) -> SeriesDescriptor {
    let mut s = SeriesDescriptor::new(SeriesKey::new(id, "free"), name);
    s.rpm_min = Some(rpm.0);
    s.rpm_max = Some(rpm.1);
    s.models.rpm_to_airflow = Some(linear(rpm.0, airflow.0, rpm.1, airflow.1));
    s.models.rpm_to_noise_db = Some(linear(rpm.0, noise.0, rpm.1, noise.1));
    s.models.noise_to_airflow = Some(linear(noise.0, airflow.0, noise.1, airflow.1));
    s.models.noise_to_rpm = Some(linear(noise.0, rpm.0, noise.1, rpm.1));
    s
}

fn spectrum(id: &str, rpm: (f64, f64), top_db: f64) -> SpectrumEntry {
    SpectrumEntry {
        model_id: id.to_string(),
        condition_id: "free".to_string(),
        model: SpectrumModel {
            centers_hz: vec![125.0, 1000.0],
            band_models_pchip: vec![
                linear(rpm.0, 10.0, rpm.1, top_db - 6.0),
                linear(rpm.0, 12.0, rpm.1, top_db),
            ],
            rpm_min: Some(rpm.0),
            rpm_max: Some(rpm.1),
            ..Default::default()
        },
    }
}

fn dataset() -> Dataset {
    Dataset::new(
        vec![
            fan("a", "A", (600.0, 2400.0), (22.0, 44.0), (50.0, 210.0)),
            fan("b", "B", (800.0, 3000.0), (25.0, 48.0), (70.0, 240.0)),
        ],
        vec![
            spectrum("a", (600.0, 2400.0), 40.0),
            spectrum("b", (800.0, 3000.0), 55.0),
        ],
    )
    .unwrap()
}

fn controller() -> (SyncController, Recorder) {
    let mut c = SyncController::new(dataset(), &FanPlotConfig::default());
    let mut rec = Recorder::default();
    c.refresh(&mut rec);
    rec.clear();
    (c, rec)
}

#[test]
fn starts_idle_at_the_middle_of_the_data() {
    let (c, _) = controller();
    assert_eq!(c.state(), SyncState::Idle);
    assert_eq!(c.window(), Some(AxisWindow::new(600.0, 3000.0)));
    assert_eq!(c.query().value(), Some(1800.0));
    assert_eq!(c.curve_frame().series.len(), 2);
    assert_eq!(c.spectrum_frame().series.len(), 2);
}

#[test]
fn drag_moves_the_query_and_redraws_both_charts() {
    let (mut c, mut rec) = controller();
    c.handle(ChartEvent::PointerPressed { value: 1000.0 }, &mut rec);
    assert_eq!(c.state(), SyncState::DraggingPointer);
    c.handle(ChartEvent::PointerMoved { value: 1200.0 }, &mut rec);
    c.handle(ChartEvent::PointerMoved { value: 5000.0 }, &mut rec);
    assert_eq!(c.query().value(), Some(3000.0));
    c.handle(ChartEvent::PointerReleased, &mut rec);
    assert_eq!(c.state(), SyncState::Idle);

    assert_eq!(rec.curves.len(), 3);
    assert_eq!(rec.spectra.len(), 3);
    assert!(rec.curves.iter().all(|(_, r)| *r == Redraw::Incremental));
    let last = rec.spectra.last().unwrap();
    assert_eq!(last.get("B").unwrap().rpm, 3000.0);
}

#[test]
fn moves_without_a_press_are_ignored() {
    let (mut c, mut rec) = controller();
    c.handle(ChartEvent::PointerMoved { value: 1000.0 }, &mut rec);
    assert_eq!(c.query().value(), Some(1800.0));
    assert!(rec.curves.is_empty());
}

#[test]
fn typed_query_interrupts_a_drag() {
    let (mut c, mut rec) = controller();
    c.handle(ChartEvent::PointerPressed { value: 1000.0 }, &mut rec);
    c.handle(ChartEvent::QueryInput { value: 2100.0 }, &mut rec);
    assert_eq!(c.state(), SyncState::Idle);
    assert_eq!(c.query().value(), Some(2100.0));
    c.handle(ChartEvent::QueryInput { value: f64::NAN }, &mut rec);
    assert_eq!(c.query().value(), Some(2100.0));
}

#[test]
fn axis_switch_rebuilds_curves_and_defers_the_spectrum() {
    let (mut c, mut rec) = controller();
    c.handle(ChartEvent::SwitchDomain(Domain::NoiseDb), &mut rec);

    assert_eq!(c.state(), SyncState::AxisSwitching);
    assert_eq!(rec.curves.len(), 1);
    let (frame, redraw) = &rec.curves[0];
    assert_eq!(*redraw, Redraw::Rebuild);
    assert_eq!(frame.domain, Domain::NoiseDb);
    assert_eq!(frame.window, Some(AxisWindow::new(22.0, 48.0)));
    assert_eq!(frame.query, Some(35.0));
    assert!(rec.spectra.is_empty());

    // The rebuilt chart reports its view: the switch has settled.
    c.handle(ChartEvent::ViewChanged(AxisWindow::new(22.0, 48.0)), &mut rec);
    assert_eq!(c.state(), SyncState::Idle);
    assert_eq!(rec.spectra.len(), 1);
    assert_eq!(rec.curves[1].1, Redraw::Incremental);
}

#[test]
fn switching_axes_keeps_each_remembered_query() {
    let (mut c, mut rec) = controller();
    c.handle(ChartEvent::QueryInput { value: 1234.0 }, &mut rec);
    c.handle(ChartEvent::SwitchDomain(Domain::NoiseDb), &mut rec);
    c.handle(ChartEvent::ViewSettled, &mut rec);
    c.handle(ChartEvent::QueryInput { value: 41.5 }, &mut rec);

    for _ in 0..5 {
        c.handle(ChartEvent::SwitchDomain(Domain::Rpm), &mut rec);
        c.handle(ChartEvent::ViewSettled, &mut rec);
        assert_eq!(c.query().value(), Some(1234.0));
        c.handle(ChartEvent::SwitchDomain(Domain::NoiseDb), &mut rec);
        c.handle(ChartEvent::ViewSettled, &mut rec);
        assert_eq!(c.query().value(), Some(41.5));
    }
}

#[test]
fn zoom_clamps_the_query_into_the_new_window() {
    let (mut c, mut rec) = controller();
    c.handle(ChartEvent::ViewChanged(AxisWindow::new(2000.0, 2500.0)), &mut rec);
    assert_eq!(c.state(), SyncState::ZoomPanning);
    assert_eq!(c.query().value(), Some(2000.0));
    let (frame, _) = rec.curves.last().unwrap();
    for s in &frame.series {
        assert!(s.line.iter().all(|p| p[0] >= 2000.0 && p[0] <= 2500.0));
    }

    rec.clear();
    c.handle(ChartEvent::ViewChanged(AxisWindow::new(2000.0, 2500.0)), &mut rec);
    assert!(rec.curves.is_empty());
    c.handle(ChartEvent::ViewSettled, &mut rec);
    assert_eq!(c.state(), SyncState::Idle);
    assert!(rec.curves.is_empty());
}

#[test]
fn hiding_a_series_resets_the_ceiling_once() {
    let (mut c, mut rec) = controller();
    assert_eq!(c.spectrum_frame().y_max, 55.0);
    let computed = c.reconstructor().ceiling_computations();

    c.handle(
        ChartEvent::LegendToggled {
            name: "B".into(),
            visible: false,
        },
        &mut rec,
    );
    assert_eq!(c.spectrum_frame().y_max, 40.0);
    assert_eq!(c.curve_frame().series.len(), 1);
    assert!(c.spectrum_frame().get("B").is_none());
    assert_eq!(c.reconstructor().ceiling_computations(), computed + 1);

    c.handle(ChartEvent::PointerPressed { value: 700.0 }, &mut rec);
    c.handle(ChartEvent::PointerMoved { value: 2300.0 }, &mut rec);
    c.handle(ChartEvent::PointerReleased, &mut rec);
    assert_eq!(c.spectrum_frame().y_max, 40.0);
    assert_eq!(c.reconstructor().ceiling_computations(), computed + 1);

    rec.clear();
    c.handle(
        ChartEvent::LegendToggled {
            name: "B".into(),
            visible: false,
        },
        &mut rec,
    );
    assert!(rec.curves.is_empty());
}

#[test]
fn resize_redraws_only_when_the_sample_count_changes() {
    let (mut c, mut rec) = controller();
    c.handle(ChartEvent::Resized { width_px: 300.0 }, &mut rec);
    assert!(rec.curves.is_empty());
    c.handle(ChartEvent::Resized { width_px: 800.0 }, &mut rec);
    assert_eq!(rec.curves.len(), 1);
    let (frame, _) = &rec.curves[0];
    assert_eq!(frame.series[0].line.len(), 40);
}

#[test]
fn readouts_follow_the_query() {
    let (mut c, mut rec) = controller();
    c.handle(ChartEvent::QueryInput { value: 1500.0 }, &mut rec);
    let a = c.curve_frame().get("A").unwrap();
    assert!((a.readout.airflow.unwrap() - 130.0).abs() < 1e-9);
    assert!((a.readout.cross.unwrap() - 33.0).abs() < 1e-9);
    assert_eq!(a.readout.spectrum_rpm, Some(1500.0));
    assert!(a.readout.composite_db.is_some());
}

#[test]
fn new_dataset_rebuilds_and_shows_everything() {
    let (mut c, mut rec) = controller();
    c.handle(
        ChartEvent::LegendToggled {
            name: "A".into(),
            visible: false,
        },
        &mut rec,
    );
    rec.clear();
    c.set_dataset(dataset(), &mut rec);
    assert_eq!(rec.curves.len(), 1);
    assert_eq!(rec.curves[0].1, Redraw::Rebuild);
    assert!(c.visibility().is_visible("A"));
    assert_eq!(c.spectrum_frame().series.len(), 2);
}

#[test]
fn subscribers_hear_query_changes() {
    let (mut c, mut rec) = controller();
    let rx = c.subscribe_query();
    c.handle(ChartEvent::QueryInput { value: 2000.0 }, &mut rec);
    let changes: Vec<_> = rx.try_iter().collect();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].value, 2000.0);
}

#[test]
fn spectrum_readouts_are_blank_until_the_switch_settles() {
    let (mut c, mut rec) = controller();
    assert!(c.curve_frame().get("A").unwrap().readout.spectrum_rpm.is_some());

    c.handle(ChartEvent::SwitchDomain(Domain::NoiseDb), &mut rec);
    let (frame, _) = &rec.curves[0];
    for s in &frame.series {
        assert!(s.readout.airflow.is_some(), "{}", s.name);
        assert_eq!(s.readout.spectrum_rpm, None, "{}", s.name);
        assert_eq!(s.readout.composite_db, None, "{}", s.name);
    }

    c.handle(ChartEvent::ViewSettled, &mut rec);
    let b = c.curve_frame().get("B").unwrap();
    let expected = c.spectrum_frame().get("B").unwrap().rpm;
    assert_eq!(b.readout.spectrum_rpm, Some(expected));
    assert!(b.readout.composite_db.is_some());
}

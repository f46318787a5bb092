use citation_viz::api::{ChartConfig, CitationChart, ReconcileDecision};
use citation_viz::core::{CENTER_PAN_PERCENT, PlotScales, ViewportPhase, Viewport};
use citation_viz::error::ChartError;
use citation_viz::interaction::NavigationTarget;
use citation_viz::records::{CitationDataResponse, PaperRecord, TrendRecord};
use citation_viz::render::NullRenderer;

fn paper(id: &str, date: &str, citations: f64) -> PaperRecord {
    PaperRecord {
        id: id.to_owned(),
        title: format!("Preprint {id}"),
        publication_date: date.to_owned(),
        total_citation: citations,
        subject: Some("neuroscience".to_owned()),
    }
}

fn papers() -> Vec<PaperRecord> {
    vec![
        paper("PPC-1", "2018-03-15", 45.0),
        paper("PPC-2", "2019-07-01", 12.0),
        paper("PPC-3", "2021-02-14", 89.0),
    ]
}

fn scatter_chart() -> CitationChart<NullRenderer> {
    CitationChart::init(NullRenderer::default(), ChartConfig::new(Viewport::new(800, 400)))
        .expect("chart")
}

fn pixel_of(chart: &CitationChart<NullRenderer>, index: usize) -> (f64, f64) {
    let window = chart.viewport_state().current().expect("window");
    let scales = PlotScales::new(window, chart.plot_area().expect("area")).expect("scales");
    let point = &chart.points()[index];
    (scales.x.to_pixel(point.x), scales.y.to_pixel(point.y))
}

#[test]
fn fresh_chart_renders_empty_state() {
    let mut chart = scatter_chart();
    assert_eq!(chart.phase(), ViewportPhase::Unset);
    assert!(chart.is_dirty());
    assert!(chart.render_if_needed().expect("render"));
    assert!(!chart.render_if_needed().expect("render"));
    assert_eq!(chart.renderer().frames_rendered, 1);
    assert_eq!(chart.renderer().last_circle_count, 0);
}

#[test]
fn loading_papers_establishes_viewport_and_draws_points() {
    let mut chart = scatter_chart();
    let decision = chart.set_paper_records(&papers()).expect("set");
    assert_eq!(decision, ReconcileDecision::FirstLoad);
    assert_eq!(chart.phase(), ViewportPhase::Established);
    assert_eq!(chart.pan_position(), CENTER_PAN_PERCENT);
    assert!(chart.visible_date_range().is_none());

    chart.render().expect("render");
    assert_eq!(chart.renderer().last_circle_count, 3);
    assert!(!chart.is_dirty());
}

#[test]
fn zoom_pan_and_reset_round_trip() {
    let mut chart = scatter_chart();
    chart.set_paper_records(&papers()).expect("set");
    let original = chart.viewport_state().original().expect("original");

    chart.zoom_in().expect("zoom in");
    assert_eq!(chart.phase(), ViewportPhase::Zoomed);
    let (from, to) = chart.visible_date_range().expect("zoomed range");
    assert!(from < to);

    chart.pan(0.0).expect("pan");
    assert_eq!(chart.pan_position(), 0.0);
    let current = chart.viewport_state().current().expect("current");
    assert_eq!(current.x.min, original.x.min);

    chart.reset_zoom().expect("reset");
    assert_eq!(chart.phase(), ViewportPhase::Established);
    assert_eq!(chart.viewport_state().current(), Some(original));
    assert_eq!(chart.pan_position(), CENTER_PAN_PERCENT);
}

#[test]
fn operations_without_data_are_noops() {
    let mut chart = scatter_chart();
    chart.render().expect("render");
    chart.zoom_in().expect("zoom");
    chart.pan(30.0).expect("pan");
    assert_eq!(chart.phase(), ViewportPhase::Unset);
    assert!(!chart.is_dirty());
    assert_eq!(chart.pointer_move(400.0, 200.0).expect("hover"), None);
    assert_eq!(chart.click(400.0, 200.0).expect("click"), None);
}

#[test]
fn hover_highlights_and_click_navigates_to_paper() {
    let mut chart = scatter_chart();
    chart.set_paper_records(&papers()).expect("set");
    chart.render().expect("render");

    let (x, y) = pixel_of(&chart, 2);
    let tooltip = chart.pointer_move(x + 3.0, y).expect("hover").expect("tooltip");
    assert_eq!(tooltip.point_index, 2);
    assert_eq!(chart.hovered_point().map(|p| p.id.as_str()), Some("PPC-3"));
    assert!(chart.is_dirty());

    let target = chart.click(x, y).expect("click");
    assert_eq!(
        target,
        Some(NavigationTarget::PaperDetail {
            id: "PPC-3".to_owned()
        })
    );

    chart.pointer_leave().expect("leave");
    assert!(chart.hovered_point().is_none());
    assert_eq!(chart.click(x + 40.0, y + 40.0).expect("click"), None);
}

#[test]
fn new_dataset_clears_hover() {
    let mut chart = scatter_chart();
    chart.set_paper_records(&papers()).expect("set");
    let (x, y) = pixel_of(&chart, 0);
    chart.pointer_move(x, y).expect("hover");
    assert!(chart.hovered_point().is_some());

    chart.set_paper_records(&papers()[..2]).expect("set");
    assert!(chart.hovered_point().is_none());
}

#[test]
fn empty_dataset_returns_to_unset() {
    let mut chart = scatter_chart();
    chart.set_paper_records(&papers()).expect("set");
    let decision = chart.set_paper_records(&[]).expect("clear");
    assert_eq!(decision, ReconcileDecision::Cleared);
    assert_eq!(chart.phase(), ViewportPhase::Unset);
    let frame = chart.build_render_frame().expect("frame");
    assert_eq!(frame.circles().count(), 0);
}

#[test]
fn trend_chart_uses_years_and_ignores_clicks() {
    let config = ChartConfig::trend(Viewport::new(800, 400));
    let mut chart = CitationChart::init(NullRenderer::default(), config).expect("chart");
    let trends = [
        TrendRecord {
            year: 2019,
            citations: 30.0,
            papers: 4,
        },
        TrendRecord {
            year: 2020,
            citations: 75.0,
            papers: 9,
        },
        TrendRecord {
            year: 2021,
            citations: 120.0,
            papers: 11,
        },
    ];
    chart.set_trend_records(&trends).expect("set");
    let original = chart.viewport_state().original().expect("window");
    assert_eq!((original.x.min, original.x.max), (2018.5, 2021.5));

    chart.zoom_in().expect("zoom");
    assert!(chart.visible_date_range().is_none());

    let (x, y) = pixel_of(&chart, 1);
    assert_eq!(chart.click(x, y).expect("click"), None);
    let frame = chart.build_render_frame().expect("frame");
    assert_eq!(frame.polygons().count(), 1);
}

#[test]
fn loaded_response_feeds_the_dataset_of_each_variant() {
    let response = CitationDataResponse {
        impact_data: papers(),
        trends_data: vec![
            TrendRecord {
                year: 2020,
                citations: 57.0,
                papers: 2,
            },
            TrendRecord {
                year: 2021,
                citations: 89.0,
                papers: 1,
            },
        ],
        ..CitationDataResponse::default()
    };

    let mut scatter = scatter_chart();
    assert_eq!(
        scatter.set_response(&response).expect("scatter"),
        ReconcileDecision::FirstLoad
    );
    assert_eq!(scatter.points().len(), 3);
    assert_eq!(scatter.points()[2].id, "PPC-3");

    let mut trend =
        CitationChart::init(NullRenderer::default(), ChartConfig::trend(Viewport::new(800, 400)))
            .expect("chart");
    trend.set_response(&response).expect("trend");
    assert_eq!(trend.points().len(), 2);
    assert_eq!(trend.points()[0].x, 2020.0);

    let broken = CitationDataResponse {
        impact_data: vec![paper("PPC-9", "not a date", 1.0)],
        ..CitationDataResponse::default()
    };
    assert!(matches!(
        scatter.set_response(&broken),
        Err(ChartError::InvalidData(_))
    ));
    assert_eq!(scatter.points().len(), 3);
}

#[test]
fn resize_validates_and_marks_dirty() {
    let mut chart = scatter_chart();
    chart.render().expect("render");
    chart.resize(Viewport::new(1024, 600)).expect("resize");
    assert!(chart.is_dirty());
    assert_eq!(chart.viewport(), Viewport::new(1024, 600));
    assert!(chart.resize(Viewport::new(0, 600)).is_err());
    assert!(chart.resize(Viewport::new(50, 50)).is_err());
}

#[test]
fn disposed_chart_rejects_calls() {
    let mut chart = scatter_chart();
    chart.set_paper_records(&papers()).expect("set");
    chart.dispose();
    assert!(chart.is_disposed());
    assert!(chart.points().is_empty());
    assert!(matches!(chart.zoom_in(), Err(ChartError::Disposed)));
    assert!(matches!(chart.render(), Err(ChartError::Disposed)));
    assert!(matches!(
        chart.set_paper_records(&papers()),
        Err(ChartError::Disposed)
    ));
    chart.dispose();
}

#[test]
fn invalid_config_fails_init() {
    let config = ChartConfig::new(Viewport::new(0, 400));
    assert!(CitationChart::init(NullRenderer::default(), config).is_err());
    assert!(ChartConfig::from_json_str(r#"{"zoom":{"zoom_in_factor":1.5}}"#).is_err());

    let parsed = ChartConfig::from_json_str(r#"{"viewport":{"width":640,"height":360}}"#)
        .expect("config");
    assert_eq!(parsed.viewport, Viewport::new(640, 360));
}

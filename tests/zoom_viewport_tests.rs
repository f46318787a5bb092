use approx::assert_relative_eq;
use citation_viz::core::{
    CENTER_PAN_PERCENT, Domain, ViewWindow, ViewportPhase, ViewportState, ZoomConfig,
    ZoomViewport,
};

fn established() -> ViewportState {
    ViewportState::Ready(
        ZoomViewport::established(ViewWindow::new(
            Domain::new(1_000.0, 2_000.0),
            Domain::new(0.0, 110.0),
        ))
        .expect("viewport"),
    )
}

fn current_x(state: ViewportState) -> Domain {
    state.current().expect("ready").x
}

#[test]
fn zoom_in_shrinks_by_factor_around_center() {
    let state = established().zoom_in(ZoomConfig::default());
    let x = current_x(state);
    assert_relative_eq!(x.span(), 700.0, epsilon = 1e-9);
    assert_relative_eq!(x.center(), 1_500.0, epsilon = 1e-9);
    assert_eq!(state.phase(), ViewportPhase::Zoomed);
    assert_eq!(state.original().expect("ready").x, Domain::new(1_000.0, 2_000.0));
}

#[test]
fn zoom_out_returns_to_established() {
    let config = ZoomConfig::default();
    let state = established().zoom_in(config).zoom_in(config);
    assert_eq!(state.phase(), ViewportPhase::Zoomed);

    let state = state.zoom_out(config).zoom_out(config);
    assert_eq!(state.phase(), ViewportPhase::Established);
    assert_eq!(current_x(state), Domain::new(1_000.0, 2_000.0));
}

#[test]
fn zoom_out_near_edge_shifts_instead_of_leaving_original() {
    let config = ZoomConfig::symmetric(0.5);
    let state = established()
        .zoom_in(config)
        .zoom_in(config)
        .pan(0.0)
        .expect("pan");
    assert_eq!(current_x(state), Domain::new(1_000.0, 1_250.0));

    let out = state.zoom_out(config);
    let x = current_x(out);
    assert_relative_eq!(x.span(), 500.0, epsilon = 1e-9);
    assert_relative_eq!(x.min, 1_000.0, epsilon = 1e-9);
}

#[test]
fn reset_restores_original_and_centers_pan() {
    let config = ZoomConfig::default();
    let state = established().zoom_in(config).pan(90.0).expect("pan");
    assert!(state.pan_position() > CENTER_PAN_PERCENT);

    let reset = state.reset();
    assert_eq!(reset.current(), reset.original());
    assert_eq!(reset.phase(), ViewportPhase::Established);
    assert_eq!(reset.pan_position(), CENTER_PAN_PERCENT);
}

#[test]
fn pan_positions_window_along_slide_range() {
    let config = ZoomConfig::symmetric(0.5);
    let zoomed = established().zoom_in(config);

    let quarter = zoomed.pan(25.0).expect("pan");
    assert_relative_eq!(current_x(quarter).min, 1_125.0, epsilon = 1e-9);
    assert_relative_eq!(current_x(quarter).span(), 500.0, epsilon = 1e-9);
    assert_relative_eq!(quarter.pan_position(), 25.0, epsilon = 1e-9);
}

#[test]
fn pan_clamps_percent_and_rejects_nan() {
    let zoomed = established().zoom_in(ZoomConfig::symmetric(0.5));
    let far = zoomed.pan(250.0).expect("pan");
    assert_eq!(current_x(far), Domain::new(1_500.0, 2_000.0));
    assert!(zoomed.pan(f64::NAN).is_err());
}

#[test]
fn pan_is_noop_while_established() {
    let state = established();
    assert_eq!(state.pan(10.0).expect("pan"), state);
    assert_eq!(state.pan_position(), CENTER_PAN_PERCENT);
}

#[test]
fn zoom_leaves_value_axis_alone() {
    let state = established().zoom_in(ZoomConfig::default());
    assert_eq!(state.current().expect("ready").y, Domain::new(0.0, 110.0));
}

#[test]
fn degenerate_original_is_rejected() {
    let window = ViewWindow::new(Domain::new(5.0, 5.0), Domain::new(0.0, 10.0));
    assert!(ZoomViewport::established(window).is_err());
}

#[test]
fn zoom_in_stops_at_minimum_width() {
    let config = ZoomConfig {
        min_width_ratio: 0.01,
        ..ZoomConfig::default()
    };
    let mut state = established();
    for _ in 0..200 {
        state = state.zoom_in(config);
    }
    let x = current_x(state);
    assert_relative_eq!(x.span(), 10.0, epsilon = 1e-9);
    assert_relative_eq!(x.center(), 1_500.0, epsilon = 1e-6);
    assert_eq!(state.zoom_in(config), state);

    let wider = current_x(state.zoom_out(config));
    assert_relative_eq!(wider.span(), 10.0 / 0.7, epsilon = 1e-9);
}

#[test]
fn default_minimum_width_is_a_ten_thousandth_of_original() {
    let config = ZoomConfig::default();
    let mut state = established();
    for _ in 0..100 {
        state = state.zoom_in(config);
    }
    assert_relative_eq!(current_x(state).span(), 0.1, epsilon = 1e-9);
    assert_eq!(state.phase(), ViewportPhase::Zoomed);
}

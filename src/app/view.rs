use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::{DashboardState, Tab};
use crate::ui::{charts, widgets};

pub fn render(f: &mut Frame, state: &DashboardState) {
    // A flagged batch failure replaces the whole dashboard
    if state.error_message.is_some() {
        widgets::render_error_screen(f, f.area(), state);
        return;
    }

    // Main layout: tab bar + body + status bar
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let tabs_area = vertical[0];
    let body_area = vertical[1];
    let status_area = vertical[2];

    widgets::render_tab_bar(f, tabs_area, state);

    match state.active_tab {
        Tab::Overview => widgets::render_overview(f, body_area, state),
        Tab::Repositories => widgets::render_repositories(f, body_area, state),
        Tab::Activity => widgets::render_activity(f, body_area, state),
        Tab::Gists => widgets::render_gists(f, body_area, state),
        Tab::PullRequests => widgets::render_pull_requests(f, body_area, state),
        Tab::Issues => widgets::render_issues(f, body_area, state),
        Tab::Insights => charts::render_insights(f, body_area, state),
    }

    widgets::render_status_bar(f, status_area, state);

    // Overlays
    widgets::render_search_overlay(f, state);
    widgets::render_toasts(f, state);
}

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph},
};

use crate::app::state::DashboardState;
use crate::stats;
use crate::ui::theme;
use crate::util::time::{relative_time, short_date};

/// Derived-statistics tab: language distribution, commit activity for the
/// spotlighted repository, per-language repo counts, contribution calendar,
/// and the remaining spotlight lists.
pub fn render_insights(f: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    render_language_chart(f, top[0], state);
    render_commit_chart(f, top[1], state);

    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_skills(f, mid[0], state);
    render_contribution_strip(f, mid[1], state);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(rows[2]);
    render_contributors(f, bottom[0], state);
    render_workflow_runs(f, bottom[1], state);
    render_highlights(f, bottom[2], state);
}

/// Proportional language-size distribution over all repositories.
fn render_language_chart(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(" Languages by size (KB) ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    if state.language_stats.is_empty() {
        f.render_widget(
            Paragraph::new("No language data").style(theme::DIM).block(block),
            area,
        );
        return;
    }

    let ranked = stats::ranked(&state.language_stats);
    let visible = ranked.len().min((area.width as usize / 10).max(1));
    let data: Vec<(&str, u64)> = ranked[..visible]
        .iter()
        .map(|(name, size)| (name.as_str(), *size))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(8)
        .bar_gap(1)
        .bar_style(theme::ACCENT)
        .value_style(theme::HEADER)
        .label_style(theme::LANG)
        .data(&data[..]);

    f.render_widget(chart, area);
}

/// Commits per UTC day for the spotlighted repository.
fn render_commit_chart(f: &mut Frame, area: Rect, state: &DashboardState) {
    let title = match &state.spotlight {
        Some(s) => format!(" Commit activity — {} ", s.repo_name),
        None => " Commit activity ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    let activity = state
        .spotlight
        .as_ref()
        .map(|s| stats::commit_activity(&s.commits))
        .unwrap_or_default();

    if activity.is_empty() {
        f.render_widget(
            Paragraph::new("No commit data").style(theme::DIM).block(block),
            area,
        );
        return;
    }

    let points: Vec<(f64, f64)> = activity
        .iter()
        .enumerate()
        .map(|(i, (_, count))| (i as f64, *count as f64))
        .collect();

    let max_count = activity.iter().map(|(_, c)| *c).max().unwrap_or(1) as f64;
    let first = short_date(activity[0].0);
    let last = short_date(activity[activity.len() - 1].0);

    let dataset = Dataset::default()
        .name("commits")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme::SUCCESS)
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::DIM)
                .bounds([0.0, (points.len().saturating_sub(1)).max(1) as f64])
                .labels([first, last]),
        )
        .y_axis(
            Axis::default()
                .style(theme::DIM)
                .bounds([0.0, max_count])
                .labels(["0".to_string(), format!("{}", max_count as u64)]),
        );

    f.render_widget(chart, area);
}

/// Repositories per language, as proportional bars.
fn render_skills(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(" Skills (repos per language) ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    if state.skills.is_empty() {
        f.render_widget(
            Paragraph::new("No language data").style(theme::DIM).block(block),
            area,
        );
        return;
    }

    let ranked = stats::ranked(&state.skills);
    let max = ranked.first().map(|(_, v)| *v).unwrap_or(1).max(1);
    let bar_space = (area.width as usize).saturating_sub(24).max(4);

    let lines: Vec<Line> = ranked
        .iter()
        .map(|(lang, count)| {
            let filled = (count * bar_space).div_ceil(max);
            Line::from(vec![
                Span::styled(format!("{:<14}", lang), theme::LANG),
                Span::styled("█".repeat(filled.min(bar_space)), theme::ACCENT),
                Span::styled(format!(" {}", count), theme::DIM),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// GitHub-style heat strip: one column per week, one row per weekday.
fn render_contribution_strip(f: &mut Frame, area: Rect, state: &DashboardState) {
    let title = match &state.contributions {
        Some(calendar) => format!(" Contributions ({} total) ", calendar.total_contributions()),
        None => " Contributions ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    let Some(calendar) = &state.contributions else {
        f.render_widget(
            Paragraph::new("Calendar unavailable").style(theme::DIM).block(block),
            area,
        );
        return;
    };

    let weeks = ((area.width as usize).saturating_sub(4) / 2).max(1);
    let day_count = weeks * 7;
    let days = if calendar.contributions.len() > day_count {
        &calendar.contributions[calendar.contributions.len() - day_count..]
    } else {
        &calendar.contributions[..]
    };

    let mut lines = Vec::with_capacity(7);
    for row in 0..7 {
        let mut spans = Vec::new();
        for week in 0..weeks {
            let idx = week * 7 + row;
            match days.get(idx) {
                Some(day) => spans.push(Span::styled(
                    "■ ",
                    ratatui::style::Style::default().fg(theme::contribution_color(day.level)),
                )),
                None => spans.push(Span::raw("  ")),
            }
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_contributors(f: &mut Frame, area: Rect, state: &DashboardState) {
    let title = match &state.spotlight {
        Some(s) => format!(" Contributors — {} ", s.repo_name),
        None => " Contributors ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    let contributors = state
        .spotlight
        .as_ref()
        .map(|s| s.contributors.as_slice())
        .unwrap_or_default();

    if contributors.is_empty() {
        f.render_widget(
            Paragraph::new("No contributor data").style(theme::DIM).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = contributors
        .iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", c.login), theme::HEADER),
                Span::styled(format!("{} contributions", c.contributions), theme::DIM),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_workflow_runs(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(" Workflow runs ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    let runs = state
        .spotlight
        .as_ref()
        .map(|s| s.workflow_runs.as_slice())
        .unwrap_or_default();

    if runs.is_empty() {
        f.render_widget(
            Paragraph::new("No workflow runs").style(theme::DIM).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = runs
        .iter()
        .map(|run| {
            let outcome = run.conclusion.as_deref().unwrap_or(&run.status);
            let style = match outcome {
                "success" => theme::SUCCESS,
                "failure" => theme::ERROR,
                _ => theme::WARNING,
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<10}", outcome), style),
                Span::raw(format!("{:<24}", run.name)),
                Span::styled(relative_time(&run.created_at), theme::DIM),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Demo content from config: achievements and blog posts. Never fetched.
fn render_highlights(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(" Highlights (demo data) ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    let mut lines = Vec::new();

    for achievement in &state.achievements {
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", achievement.icon)),
            Span::styled(achievement.title.clone(), theme::HEADER),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", achievement.description),
            theme::DIM,
        )));
    }

    if !state.blog_posts.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Posts:", theme::HEADER)));
        for post in &state.blog_posts {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", post.date), theme::DIM),
                Span::raw(post.title.clone()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
};

use crate::app::state::{DashboardState, NotifyLevel, Tab};
use crate::ui::theme;
use crate::util::time::{iso_date, relative_time};

pub fn render_tab_bar(f: &mut Frame, area: Rect, state: &DashboardState) {
    let mut spans: Vec<Span> = vec![Span::styled(" quackhub ", theme::HEADER)];

    for tab in Tab::ALL {
        let style = if tab == state.active_tab {
            theme::TAB_ACTIVE
        } else {
            theme::TAB_INACTIVE
        };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
        spans.push(Span::styled("│", theme::DIM));
    }
    spans.pop();

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_overview(f: &mut Frame, area: Rect, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_profile_card(f, columns[0], state);
    render_profile_readme(f, columns[1], state);
}

fn render_profile_card(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(" Profile ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    let Some(profile) = &state.profile else {
        let msg = if state.loading { "Loading..." } else { "No data" };
        f.render_widget(Paragraph::new(msg).style(theme::DIM).block(block), area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            profile.name.clone().unwrap_or_else(|| profile.login.clone()),
            theme::HEADER,
        )),
        Line::from(Span::styled(format!("@{}", profile.login), theme::ACCENT)),
        Line::from(""),
    ];

    if let Some(bio) = &profile.bio {
        lines.push(Line::from(bio.clone()));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(format!(
        "Repos: {}   Followers: {}   Following: {}",
        profile.public_repos, profile.followers, profile.following
    )));

    if let Some(company) = &profile.company {
        lines.push(Line::from(format!("Company: {}", company)));
    }
    if let Some(location) = &profile.location {
        lines.push(Line::from(format!("Location: {}", location)));
    }
    if let Some(blog) = &profile.blog
        && !blog.is_empty()
    {
        lines.push(Line::from(format!("Blog: {}", blog)));
    }

    lines.push(Line::from(Span::styled(
        format!("Member since {}", iso_date(&profile.created_at)),
        theme::DIM,
    )));

    if !state.organizations.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Organizations:", theme::HEADER)));
        for org in &state.organizations {
            lines.push(Line::from(format!("  {}", org.login)));
        }
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_profile_readme(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(" README ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    let text = if state.loading && state.profile_readme.is_empty() {
        "Loading..."
    } else {
        state.profile_readme.as_str()
    };

    f.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

pub fn render_repositories(f: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    render_filter_line(f, rows[0], state);

    if state.selected_repo.is_some() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        render_repo_list(f, columns[0], state);
        render_repo_detail(f, columns[1], state);
    } else {
        render_repo_list(f, rows[1], state);
    }
}

fn render_filter_line(f: &mut Frame, area: Rect, state: &DashboardState) {
    let language = state.language_filter.as_deref().unwrap_or("all");
    let scroll = if state.infinite_scroll { "on" } else { "off" };

    let mut spans = vec![
        Span::styled(" sort: ", theme::DIM),
        Span::styled(state.sort_key.label(), theme::ACCENT),
        Span::styled("  lang: ", theme::DIM),
        Span::styled(language, theme::LANG),
        Span::styled("  created: ", theme::DIM),
        Span::styled(state.date_preset.label(), theme::ACCENT),
        Span::styled("  scroll: ", theme::DIM),
        Span::styled(scroll, theme::ACCENT),
    ];

    if !state.search_query.is_empty() {
        spans.push(Span::styled("  search: ", theme::DIM));
        spans.push(Span::styled(state.search_query.as_str(), theme::WARNING));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_repo_list(f: &mut Frame, area: Rect, state: &DashboardState) {
    let revealed = state.paginated_repos();

    let title = format!(
        " Repositories ({}/{}) page {}/{} ",
        revealed.len(),
        state.filtered_repos.len(),
        state.current_page,
        state.total_pages().max(1),
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    if revealed.is_empty() {
        let msg = if state.loading {
            "Loading..."
        } else if state.repos.is_empty() {
            "No repositories"
        } else {
            "No repositories match the current filters"
        };
        f.render_widget(Paragraph::new(msg).style(theme::DIM).block(block), area);
        return;
    }

    let items: Vec<ListItem> = revealed
        .iter()
        .enumerate()
        .map(|(i, repo)| {
            let selected = i == state.cursor;

            let mut spans = vec![Span::styled(
                format!("{:<28}", truncate(&repo.name, 28)),
                if selected { theme::HIGHLIGHT } else { theme::HEADER },
            )];

            if !selected {
                spans.push(Span::styled(
                    format!(" {:<12}", repo.language.as_deref().unwrap_or("-")),
                    theme::LANG,
                ));
                spans.push(Span::styled(
                    format!(" ★{:<5}", repo.stargazers_count),
                    theme::STARS,
                ));
                spans.push(Span::styled(
                    format!(" ⑂{:<4}", repo.forks_count),
                    theme::DIM,
                ));
                spans.push(Span::styled(
                    format!(" !{:<4}", repo.open_issues_count),
                    theme::DIM,
                ));
                spans.push(Span::styled(relative_time(&repo.updated_at), theme::DIM));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_repo_detail(f: &mut Frame, area: Rect, state: &DashboardState) {
    let name = state.selected_repo.as_deref().unwrap_or("");

    let block = Block::default()
        .title(format!(" {} ", name))
        .borders(Borders::ALL)
        .border_style(theme::ACCENT);

    let repo = state.repos.iter().find(|r| r.name == name);

    let mut lines = Vec::new();
    if let Some(repo) = repo {
        if let Some(desc) = &repo.description {
            lines.push(Line::from(desc.clone()));
        }
        lines.push(Line::from(Span::styled(
            format!(
                "★ {}  ⑂ {}  watchers {}  issues {}  {} KB",
                repo.stargazers_count,
                repo.forks_count,
                repo.watchers_count,
                repo.open_issues_count,
                repo.size
            ),
            theme::DIM,
        )));
        if !repo.topics.is_empty() {
            lines.push(Line::from(Span::styled(
                repo.topics.join(", "),
                theme::LANG,
            )));
        }
        lines.push(Line::from(""));
    }

    if state.readme_loading {
        lines.push(Line::from(Span::styled("Loading README...", theme::DIM)));
    } else if let Some(content) = &state.readme_content {
        for text_line in content.lines() {
            lines.push(Line::from(text_line.to_string()));
        }
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

pub fn render_activity(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(format!(" Recent Activity ({}) ", state.events.len()))
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    if state.events.is_empty() {
        let msg = if state.loading { "Loading..." } else { "No recent public activity" };
        f.render_widget(Paragraph::new(msg).style(theme::DIM).block(block), area);
        return;
    }

    let items: Vec<ListItem> = state
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let style = if i == state.cursor {
                theme::HIGHLIGHT
            } else {
                ratatui::style::Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<22}", event.kind), theme::ACCENT),
                Span::styled(format!(" {:<40}", truncate(&event.repo.name, 40)), style),
                Span::styled(relative_time(&event.created_at), theme::DIM),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

pub fn render_gists(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(format!(" Gists ({}) ", state.gists.len()))
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    if state.gists.is_empty() {
        let msg = if state.loading { "Loading..." } else { "No public gists" };
        f.render_widget(Paragraph::new(msg).style(theme::DIM).block(block), area);
        return;
    }

    let items: Vec<ListItem> = state
        .gists
        .iter()
        .enumerate()
        .map(|(i, gist)| {
            let style = if i == state.cursor {
                theme::HIGHLIGHT
            } else {
                ratatui::style::Style::default()
            };
            let description = gist
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "(no description)".to_string());
            let language = gist
                .files
                .values()
                .find_map(|file| file.language.clone())
                .unwrap_or_else(|| "-".to_string());
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<50}", truncate(&description, 50)), style),
                Span::styled(format!(" {:<12}", language), theme::LANG),
                Span::styled(format!(" {} file(s) ", gist.files.len()), theme::DIM),
                Span::styled(relative_time(&gist.created_at), theme::DIM),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

pub fn render_pull_requests(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(format!(" Pull Requests ({}) ", state.pulls.len()))
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    if state.pulls.is_empty() {
        let msg = if state.loading { "Loading..." } else { "No pull requests" };
        f.render_widget(Paragraph::new(msg).style(theme::DIM).block(block), area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#").style(theme::HEADER),
        Cell::from("Title").style(theme::HEADER),
        Cell::from("State").style(theme::HEADER),
        Cell::from("Author").style(theme::HEADER),
        Cell::from("Updated").style(theme::HEADER),
    ])
    .height(1);

    let rows: Vec<Row> = state
        .pulls
        .iter()
        .enumerate()
        .map(|(i, pr)| {
            let style = if i == state.cursor {
                theme::HIGHLIGHT
            } else {
                ratatui::style::Style::default()
            };
            let state_label = if pr.merged_at.is_some() {
                "merged"
            } else {
                pr.state.as_str()
            };
            let state_style = match state_label {
                "open" => theme::SUCCESS,
                "merged" => theme::LANG,
                _ => theme::DIM,
            };
            Row::new(vec![
                Cell::from(format!("#{}", pr.number)).style(theme::ACCENT),
                Cell::from(truncate(&pr.title, 60)).style(style),
                Cell::from(state_label.to_string()).style(state_style),
                Cell::from(pr.author().to_string()).style(theme::WARNING),
                Cell::from(relative_time(&pr.updated_at)).style(theme::DIM),
            ])
            .height(1)
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(16),
        Constraint::Length(10),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

pub fn render_issues(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(format!(" Issues ({}) ", state.issues.len()))
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    if state.issues.is_empty() {
        let msg = if state.loading { "Loading..." } else { "No issues" };
        f.render_widget(Paragraph::new(msg).style(theme::DIM).block(block), area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#").style(theme::HEADER),
        Cell::from("Title").style(theme::HEADER),
        Cell::from("State").style(theme::HEADER),
        Cell::from("Author").style(theme::HEADER),
        Cell::from("Updated").style(theme::HEADER),
    ])
    .height(1);

    let rows: Vec<Row> = state
        .issues
        .iter()
        .enumerate()
        .map(|(i, issue)| {
            let style = if i == state.cursor {
                theme::HIGHLIGHT
            } else {
                ratatui::style::Style::default()
            };
            let state_style = if issue.state == "open" {
                theme::SUCCESS
            } else {
                theme::DIM
            };
            Row::new(vec![
                Cell::from(format!("#{}", issue.number)).style(theme::ACCENT),
                Cell::from(truncate(&issue.title, 60)).style(style),
                Cell::from(issue.state.clone()).style(state_style),
                Cell::from(issue.author().to_string()).style(theme::WARNING),
                Cell::from(relative_time(&issue.updated_at)).style(theme::DIM),
            ])
            .height(1)
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(16),
        Constraint::Length(10),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &DashboardState) {
    let key_hints = if state.search_active {
        "Esc: close search | Enter: keep filter"
    } else {
        "j/k: move | Tab: tabs | Enter: select | /: search | s/f/d: sort/lang/date | r: refresh | o: open | q: quit"
    };

    let status = if state.loading { " Refreshing..." } else { "" };

    let refresh_info = state
        .last_refresh
        .as_ref()
        .map(|t| format!("updated {}", relative_time(t)))
        .unwrap_or_default();

    let total_width = area.width as usize;
    let left = format!("{}{}", key_hints, status);
    let padding = total_width
        .saturating_sub(left.chars().count())
        .saturating_sub(refresh_info.chars().count());

    let line = Line::from(vec![
        Span::styled(left, theme::STATUS_BAR),
        Span::styled(" ".repeat(padding), theme::STATUS_BAR),
        Span::styled(refresh_info, theme::STATUS_BAR),
    ]);

    f.render_widget(Paragraph::new(line).style(theme::STATUS_BAR), area);
}

pub fn render_search_overlay(f: &mut Frame, state: &DashboardState) {
    if !state.search_active {
        return;
    }

    let full = f.area();
    let search_area = Rect {
        x: 0,
        y: full.height.saturating_sub(2),
        width: full.width,
        height: 1,
    };

    let text = format!("/{}", state.search_query);
    let para = Paragraph::new(Span::styled(text, theme::HEADER)).style(theme::STATUS_BAR);
    f.render_widget(Clear, search_area);
    f.render_widget(para, search_area);
}

/// Stacked transient notifications in the top-right corner.
pub fn render_toasts(f: &mut Frame, state: &DashboardState) {
    let full = f.area();
    let mut y = 1u16;

    for notification in state.notifications.iter().rev().take(3) {
        let style = match notification.level {
            NotifyLevel::Error => theme::ERROR,
            NotifyLevel::Warn => theme::WARNING,
            NotifyLevel::Info => theme::ACCENT,
        };

        let message = truncate(&notification.message, (full.width as usize).saturating_sub(8));
        let width = (message.chars().count() as u16 + 4).min(full.width);
        let toast_area = Rect {
            x: full.width.saturating_sub(width + 1),
            y,
            width,
            height: 3,
        };
        if toast_area.bottom() > full.height {
            break;
        }

        f.render_widget(Clear, toast_area);
        f.render_widget(
            Paragraph::new(message).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style),
            ),
            toast_area,
        );

        y = y.saturating_add(3);
    }
}

pub fn render_error_screen(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(msg) = &state.error_message else {
        return;
    };

    let card_width = (area.width * 2 / 3).clamp(40, area.width);
    let card_height = 7u16.min(area.height);
    let card = Rect {
        x: (area.width.saturating_sub(card_width)) / 2,
        y: (area.height.saturating_sub(card_height)) / 2,
        width: card_width,
        height: card_height,
    };

    let block = Block::default()
        .title(" Something went wrong ")
        .borders(Borders::ALL)
        .border_style(theme::ERROR);

    let text = vec![
        Line::from(Span::styled(msg.as_str(), theme::ERROR)),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to retry, Esc to dismiss, q to quit",
            theme::DIM,
        )),
    ];

    f.render_widget(Clear, card);
    f.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
        card,
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

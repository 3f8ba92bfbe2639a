use chrono::Utc;

use crate::app::actions::{Action, DataPayload, SideEffect};
use crate::app::state::{DashboardState, NO_README_PLACEHOLDER, NotifyLevel, Tab};

pub fn update(state: &mut DashboardState, action: Action) -> Vec<SideEffect> {
    match action {
        Action::Quit => {
            state.should_quit = true;
            vec![]
        }
        Action::MoveUp => {
            if state.cursor > 0 {
                state.cursor -= 1;
            }
            vec![]
        }
        Action::MoveDown => {
            let len = state.visible_len();
            if state.cursor + 1 < len {
                state.cursor += 1;
            } else if state.active_tab == Tab::Repositories
                && state.cursor + 1 == len
                && state.advance_page()
            {
                // Cursor hit the last revealed row: the infinite-scroll
                // sentinel. advance_page refuses past the last page.
                state.cursor += 1;
            }
            vec![]
        }
        Action::NextTab => {
            state.active_tab = state.active_tab.next();
            state.cursor = 0;
            vec![]
        }
        Action::PrevTab => {
            state.active_tab = state.active_tab.prev();
            state.cursor = 0;
            vec![]
        }
        Action::Select => {
            if let Some(repo) = state.repo_under_cursor() {
                let name = repo.name.clone();
                state.selected_repo = Some(name.clone());
                state.readme_content = None;
                state.readme_loading = true;
                return vec![SideEffect::FetchRepoReadme { repo: name }];
            }
            vec![]
        }
        Action::Back => {
            if state.search_active {
                state.search_active = false;
                state.search_query.clear();
                state.apply_filters();
            } else if state.selected_repo.is_some() {
                state.selected_repo = None;
                state.readme_content = None;
                state.readme_loading = false;
            } else if state.error_message.is_some() {
                state.error_message = None;
            }
            vec![]
        }
        Action::Refresh => {
            if state.loading {
                return vec![];
            }
            state.loading = true;
            state.error_message = None;
            vec![SideEffect::RefreshAll]
        }
        Action::OpenInBrowser => {
            let url = match state.repo_under_cursor() {
                Some(repo) => Some(repo.html_url.clone()),
                None => state.profile.as_ref().map(|p| p.html_url.clone()),
            };
            if let Some(url) = url {
                vec![SideEffect::OpenUrl(url)]
            } else {
                vec![]
            }
        }
        Action::ToggleSearch => {
            if state.search_active {
                state.search_active = false;
            } else {
                state.active_tab = Tab::Repositories;
                state.search_active = true;
                state.search_query.clear();
                state.apply_filters();
            }
            vec![]
        }
        Action::SearchInput(ch) => {
            if state.search_active {
                state.search_query.push(ch);
                state.apply_filters();
            }
            vec![]
        }
        Action::SearchBackspace => {
            if state.search_active {
                state.search_query.pop();
                state.apply_filters();
            }
            vec![]
        }
        Action::CycleSort => {
            state.sort_key = state.sort_key.next();
            state.apply_filters();
            vec![]
        }
        Action::CycleLanguageFilter => {
            let options = state.language_options();
            state.language_filter = match &state.language_filter {
                None => options.first().cloned(),
                Some(current) => {
                    let pos = options.iter().position(|l| l == current);
                    match pos {
                        Some(i) if i + 1 < options.len() => Some(options[i + 1].clone()),
                        _ => None,
                    }
                }
            };
            state.apply_filters();
            vec![]
        }
        Action::CycleDateRange => {
            state.date_preset = state.date_preset.next();
            state.date_range = state.date_preset.bounds(Utc::now());
            state.apply_filters();
            vec![]
        }
        Action::ToggleInfiniteScroll => {
            state.infinite_scroll = !state.infinite_scroll;
            vec![]
        }
        Action::DataLoaded(payload) => {
            match payload {
                DataPayload::Snapshot(snapshot) => {
                    let mut snapshot = *snapshot;
                    let warnings = std::mem::take(&mut snapshot.warnings);
                    state.apply_snapshot(snapshot);
                    for warning in warnings {
                        state.push_notification(NotifyLevel::Warn, warning);
                    }
                }
                DataPayload::RepoReadme { repo, content } => {
                    if state.selected_repo.as_deref() == Some(repo.as_str()) {
                        state.readme_content = Some(content);
                        state.readme_loading = false;
                    }
                }
                DataPayload::RepoReadmeFailed { repo, message } => {
                    if state.selected_repo.as_deref() == Some(repo.as_str()) {
                        state.readme_content = Some(NO_README_PLACEHOLDER.to_string());
                        state.readme_loading = false;
                    }
                    state.push_notification(
                        NotifyLevel::Warn,
                        format!("Failed to fetch README for {repo}: {message}"),
                    );
                }
            }
            vec![]
        }
        Action::LoadError(msg) => {
            state.loading = false;
            state.push_notification(NotifyLevel::Error, msg.clone());
            state.error_message = Some(msg);
            vec![]
        }
        Action::DismissError => {
            state.error_message = None;
            vec![]
        }
        Action::Tick => {
            state.prune_notifications();
            vec![]
        }
    }
}

use crate::app::refresh::DashboardSnapshot;

#[derive(Debug)]
pub enum Action {
    MoveUp,
    MoveDown,
    NextTab,
    PrevTab,
    Select,
    Back,
    Refresh,
    OpenInBrowser,
    ToggleSearch,
    SearchInput(char),
    SearchBackspace,
    CycleSort,
    CycleLanguageFilter,
    CycleDateRange,
    ToggleInfiniteScroll,
    DataLoaded(DataPayload),
    LoadError(String),
    DismissError,
    Quit,
    Tick,
}

#[derive(Debug)]
pub enum DataPayload {
    /// One whole refresh; applied atomically or not at all.
    Snapshot(Box<DashboardSnapshot>),
    RepoReadme {
        repo: String,
        content: String,
    },
    RepoReadmeFailed {
        repo: String,
        message: String,
    },
}

#[derive(Debug)]
pub enum SideEffect {
    RefreshAll,
    FetchRepoReadme { repo: String },
    OpenUrl(String),
}

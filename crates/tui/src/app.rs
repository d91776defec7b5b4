mod draw;

use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamehub_core::{
    catalog::{CatalogStore, CategoryStats, ReleaseQuery},
    models::{CategoryFilter, Game},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::theme::Theme;

const TICK_RATE: Duration = Duration::from_millis(250);
const RELATED_LIMIT: usize = 4;
const SUGGESTED_LIMIT: usize = 3;
const MAX_SEARCH_LEN: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    Categories,
    Releases,
    Detail,
    Play,
}

impl Screen {
    const TOP_LEVEL: [Screen; 3] = [Screen::Home, Screen::Categories, Screen::Releases];

    fn tab_index(self) -> Option<usize> {
        Self::TOP_LEVEL.iter().position(|screen| *screen == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomeSection {
    Recent,
    Trending,
    NewReleases,
    AllGames,
}

impl HomeSection {
    fn index(self) -> usize {
        match self {
            HomeSection::Recent => 0,
            HomeSection::Trending => 1,
            HomeSection::NewReleases => 2,
            HomeSection::AllGames => 3,
        }
    }

    fn title(self) -> &'static str {
        match self {
            HomeSection::Recent => "RECENTLY PLAYED",
            HomeSection::Trending => "TRENDING GAMES",
            HomeSection::NewReleases => "NEW RELEASES",
            HomeSection::AllGames => "ALL GAMES",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Grid,
    List,
}

enum AppEvent {
    Input(Event),
    Tick,
}

struct HomeState {
    section: HomeSection,
    cursors: [usize; 4],
    filter: CategoryFilter,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            section: HomeSection::Trending,
            cursors: [0; 4],
            filter: CategoryFilter::All,
        }
    }
}

impl HomeState {
    fn cursor(&self, section: HomeSection) -> usize {
        self.cursors[section.index()]
    }

    fn move_card(&mut self, delta: isize, len: usize) {
        let slot = &mut self.cursors[self.section.index()];
        *slot = step(*slot, delta, len);
    }

    fn clamp(&mut self, section: HomeSection, len: usize) {
        let slot = &mut self.cursors[section.index()];
        *slot = (*slot).min(len.saturating_sub(1));
    }
}

struct CategoriesState {
    cursor: usize,
    selected: Option<CategoryFilter>,
    game_cursor: usize,
    view_mode: ViewMode,
    grid_columns: usize,
}

impl Default for CategoriesState {
    fn default() -> Self {
        Self {
            cursor: 0,
            selected: None,
            game_cursor: 0,
            view_mode: ViewMode::Grid,
            grid_columns: 1,
        }
    }
}

#[derive(Default)]
struct ReleasesState {
    query: ReleaseQuery,
    cursor: usize,
}

struct DetailState {
    game_id: String,
    game: Option<Game>,
    liked: bool,
    related: Vec<Game>,
    related_cursor: usize,
}

struct PlayState {
    game: Game,
    started_at: DateTime<Local>,
    muted: bool,
    rating: Option<u8>,
    restarts: u32,
    suggested: Vec<Game>,
    suggested_cursor: usize,
}

impl PlayState {
    fn new(game: Game, suggested: Vec<Game>) -> Self {
        Self {
            game,
            started_at: Local::now(),
            muted: false,
            rating: None,
            restarts: 0,
            suggested,
            suggested_cursor: 0,
        }
    }

    fn restart(&mut self) {
        self.started_at = Local::now();
        self.restarts += 1;
    }

    fn elapsed_label(&self) -> String {
        let seconds = (Local::now() - self.started_at).num_seconds().max(0);
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}

/// Top-level state for the catalog browser.
pub struct GameHubApp {
    store: CatalogStore,
    source_label: String,
    theme: Theme,
    screen: Screen,
    root: Screen,
    mode: Mode,
    status: String,
    should_quit: bool,
    ticks: u64,
    recent: Vec<Game>,
    stats: Vec<CategoryStats>,
    home: HomeState,
    categories: CategoriesState,
    releases: ReleasesState,
    detail: Option<DetailState>,
    play: Option<PlayState>,
}

impl GameHubApp {
    pub fn new(store: CatalogStore, theme: Theme, source_label: String) -> Self {
        let stats = store.category_stats();
        let mut app = Self {
            store,
            source_label,
            theme,
            screen: Screen::Home,
            root: Screen::Home,
            mode: Mode::Browse,
            status: String::new(),
            should_quit: false,
            ticks: 0,
            recent: Vec::new(),
            stats,
            home: HomeState::default(),
            categories: CategoriesState::default(),
            releases: ReleasesState::default(),
            detail: None,
            play: None,
        };
        app.show_page(Screen::Home);
        app.set_status(format!("Loaded {} games", app.store.len()));
        app
    }

    /// Jump straight to a game's detail page before the UI starts.
    pub fn open_on_start(&mut self, id: &str) {
        self.open_detail(id);
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let result = loop {
            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break Err(err.into());
            }
            if self.should_quit {
                break Ok(());
            }
            match event_rx.recv().await {
                Some(AppEvent::Input(event)) => {
                    if let Err(err) = self.handle_input(event) {
                        error!(?err, "Input handling failed");
                        self.set_status(format!("Error: {err}"));
                    }
                }
                Some(AppEvent::Tick) => self.handle_tick(),
                None => break Ok(()),
            }
        };

        restore_terminal(&mut terminal)?;
        info!("Exiting");
        result
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn handle_tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    fn show_page(&mut self, screen: Screen) {
        self.mode = Mode::Browse;
        self.screen = screen;
        if screen.tab_index().is_some() {
            self.root = screen;
        }
        if screen == Screen::Home {
            self.refresh_home();
        }
    }

    fn refresh_home(&mut self) {
        self.recent = self.store.recently_played();
        let rows = self.home_rows();
        if !rows.iter().any(|(section, _)| *section == self.home.section) {
            self.home.section = HomeSection::Trending;
        }
        for (section, games) in &rows {
            self.home.clamp(*section, games.len());
        }
    }

    fn home_rows(&self) -> Vec<(HomeSection, Vec<Game>)> {
        let mut rows = Vec::with_capacity(4);
        if !self.recent.is_empty() {
            rows.push((HomeSection::Recent, self.recent.clone()));
        }
        rows.push((HomeSection::Trending, self.store.trending()));
        rows.push((HomeSection::NewReleases, self.store.new_releases()));
        rows.push((
            HomeSection::AllGames,
            self.store.by_category(self.home.filter),
        ));
        rows
    }

    fn category_games(&self) -> Vec<Game> {
        self.categories
            .selected
            .map(|filter| self.store.by_category(filter))
            .unwrap_or_default()
    }

    fn release_results(&self) -> Vec<Game> {
        self.store.releases(&self.releases.query)
    }

    fn record_play(&mut self, id: &str) {
        if let Err(err) = self.store.add_to_recently_played(id) {
            error!(?err, game_id = id, "Failed to update recently played");
            self.set_status(format!("Could not save recently played: {err}"));
        }
    }

    fn open_detail(&mut self, id: &str) {
        let game = self.store.by_id(id).cloned();
        match &game {
            Some(game) => {
                info!(game_id = %game.id, title = %game.title, "Opening game");
                self.record_play(&game.id);
                self.set_status(format!("Viewing {}", game.title));
            }
            None => {
                warn!(game_id = id, "Requested game not in catalog");
                self.set_status(format!("Game {id} not found"));
            }
        }
        self.detail = Some(DetailState {
            game_id: id.to_string(),
            game,
            liked: false,
            related: self.store.related(id, RELATED_LIMIT),
            related_cursor: 0,
        });
        self.mode = Mode::Browse;
        self.screen = Screen::Detail;
    }

    fn start_play(&mut self) {
        let Some(game) = self.detail.as_ref().and_then(|detail| detail.game.clone()) else {
            self.set_status("Nothing to play".to_string());
            return;
        };
        if !game.is_playable() {
            self.set_status(format!("{} has no playable build", game.title));
            return;
        }
        self.record_play(&game.id);
        info!(game_id = %game.id, "Starting play session");
        self.set_status(format!("Playing {}", game.title));
        let suggested = self.store.related(&game.id, SUGGESTED_LIMIT);
        self.play = Some(PlayState::new(game, suggested));
        self.screen = Screen::Play;
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }
        if self.mode == Mode::Search {
            self.handle_search_key(key);
            return Ok(());
        }
        if self.handle_global_key(&key) {
            return Ok(());
        }
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Categories => self.handle_categories_key(key),
            Screen::Releases => self.handle_releases_key(key),
            Screen::Detail => self.handle_detail_key(key),
            Screen::Play => self.handle_play_key(key),
        }
        Ok(())
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        let tab = self.root.tab_index().unwrap_or(0);
        let target = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Tab => Screen::TOP_LEVEL[(tab + 1) % Screen::TOP_LEVEL.len()],
            KeyCode::BackTab => {
                Screen::TOP_LEVEL[(tab + Screen::TOP_LEVEL.len() - 1) % Screen::TOP_LEVEL.len()]
            }
            // digits rate the game on the play page
            KeyCode::Char('1') if self.screen != Screen::Play => Screen::Home,
            KeyCode::Char('2') if self.screen != Screen::Play => Screen::Categories,
            KeyCode::Char('3') if self.screen != Screen::Play => Screen::Releases,
            _ => return false,
        };
        self.show_page(target);
        debug!(?target, "Switched page");
        true
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        let rows = self.home_rows();
        let Some(row_idx) = rows
            .iter()
            .position(|(section, _)| *section == self.home.section)
        else {
            self.home.section = HomeSection::Trending;
            return;
        };
        let len = rows[row_idx].1.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = step(row_idx, 1, rows.len());
                self.home.section = rows[next].0;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = step(row_idx, -1, rows.len());
                self.home.section = rows[prev].0;
            }
            KeyCode::Char('l') | KeyCode::Right => self.home.move_card(1, len),
            KeyCode::Char('h') | KeyCode::Left => self.home.move_card(-1, len),
            KeyCode::Char(']') => self.cycle_home_filter(1),
            KeyCode::Char('[') => self.cycle_home_filter(-1),
            KeyCode::Enter => {
                let cursor = self.home.cursor(self.home.section);
                if let Some(id) = rows[row_idx].1.get(cursor).map(|game| game.id.clone()) {
                    self.open_detail(&id);
                }
            }
            _ => {}
        }
    }

    fn cycle_home_filter(&mut self, delta: isize) {
        self.home.filter = self.home.filter.cycle(delta);
        self.home.section = HomeSection::AllGames;
        self.home.cursors[HomeSection::AllGames.index()] = 0;
        let count = self.store.by_category(self.home.filter).len();
        self.set_status(format!("{}: {count} games", self.home.filter));
    }

    fn handle_categories_key(&mut self, key: KeyEvent) {
        if self.categories.selected.is_some() {
            self.handle_category_games_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.categories.cursor = step(self.categories.cursor, 1, self.stats.len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.categories.cursor = step(self.categories.cursor, -1, self.stats.len());
            }
            KeyCode::Enter => {
                if let Some(stat) = self.stats.get(self.categories.cursor) {
                    let filter = CategoryFilter::Only(stat.category);
                    self.select_category(filter);
                }
            }
            KeyCode::Char('a') => self.select_category(CategoryFilter::All),
            KeyCode::Esc => self.show_page(Screen::Home),
            _ => {}
        }
    }

    fn select_category(&mut self, filter: CategoryFilter) {
        self.categories.selected = Some(filter);
        self.categories.game_cursor = 0;
        let count = self.category_games().len();
        self.set_status(format!("{filter}: {count} games found"));
    }

    fn handle_category_games_key(&mut self, key: KeyEvent) {
        let len = self.category_games().len();
        let row = match self.categories.view_mode {
            ViewMode::Grid => self.categories.grid_columns.max(1) as isize,
            ViewMode::List => 1,
        };
        let cursor = self.categories.game_cursor;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.categories.game_cursor = step(cursor, row, len);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.categories.game_cursor = step(cursor, -row, len);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.categories.game_cursor = step(cursor, 1, len);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.categories.game_cursor = step(cursor, -1, len);
            }
            KeyCode::Char('v') => {
                self.categories.view_mode = match self.categories.view_mode {
                    ViewMode::Grid => ViewMode::List,
                    ViewMode::List => ViewMode::Grid,
                };
            }
            KeyCode::Enter => {
                if let Some(game) = self.category_games().get(cursor) {
                    let id = game.id.clone();
                    self.open_detail(&id);
                }
            }
            KeyCode::Esc | KeyCode::Backspace => {
                self.categories.selected = None;
                self.set_status("Categories".to_string());
            }
            _ => {}
        }
    }

    fn handle_releases_key(&mut self, key: KeyEvent) {
        let len = self.release_results().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.releases.cursor = step(self.releases.cursor, 1, len);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.releases.cursor = step(self.releases.cursor, -1, len);
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.set_status("Type to search releases".to_string());
            }
            KeyCode::Char('c') => self.update_release_query(|query| {
                query.category = query.category.cycle(1);
            }),
            KeyCode::Char('C') => self.update_release_query(|query| {
                query.category = query.category.cycle(-1);
            }),
            KeyCode::Char('s') => self.update_release_query(|query| {
                query.sort = query.sort.next();
            }),
            KeyCode::Char('d') => self.update_release_query(|query| {
                query.direction = query.direction.toggled();
            }),
            KeyCode::Char('x') => self.update_release_query(ReleaseQuery::clear_filters),
            KeyCode::Enter => {
                if let Some(game) = self.release_results().get(self.releases.cursor) {
                    let id = game.id.clone();
                    self.open_detail(&id);
                }
            }
            _ => {}
        }
    }

    fn update_release_query(&mut self, change: impl FnOnce(&mut ReleaseQuery)) {
        change(&mut self.releases.query);
        self.releases.cursor = 0;
        let query = &self.releases.query;
        let count = self.store.releases(query).len();
        self.status = format!(
            "{count} releases • {} • {} {}",
            query.category, query.sort, query.direction
        );
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.mode = Mode::Browse;
                self.set_status(format!("Search applied: {}", self.releases.query.search));
            }
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                self.releases.query.search.clear();
                self.releases.cursor = 0;
                self.set_status("Search cleared".to_string());
            }
            KeyCode::Backspace => {
                self.releases.query.search.pop();
                self.releases.cursor = 0;
            }
            KeyCode::Char(ch) => {
                let plain = key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT;
                if plain && self.releases.query.search.chars().count() < MAX_SEARCH_LEN {
                    self.releases.query.search.push(ch);
                    self.releases.cursor = 0;
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(detail) = self.detail.as_mut() else {
            self.show_page(self.root);
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.show_page(self.root),
            KeyCode::Char('p') | KeyCode::Enter => self.start_play(),
            KeyCode::Char('f') if detail.game.is_some() => {
                detail.liked = !detail.liked;
                let message = if detail.liked {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                };
                self.set_status(message.to_string());
            }
            KeyCode::Char('l') | KeyCode::Right => {
                detail.related_cursor = step(detail.related_cursor, 1, detail.related.len());
            }
            KeyCode::Char('h') | KeyCode::Left => {
                detail.related_cursor = step(detail.related_cursor, -1, detail.related.len());
            }
            KeyCode::Char('o') => {
                if let Some(id) = detail
                    .related
                    .get(detail.related_cursor)
                    .map(|game| game.id.clone())
                {
                    self.open_detail(&id);
                }
            }
            _ => {}
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent) {
        let Some(play) = self.play.as_mut() else {
            self.screen = Screen::Detail;
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                let id = play.game.id.clone();
                self.play = None;
                self.open_detail(&id);
            }
            KeyCode::Char(ch @ '1'..='5') => {
                let stars = ch as u8 - b'0';
                play.rating = Some(stars);
                info!(game_id = %play.game.id, stars, "Game rated");
                self.set_status(format!("Rated {stars}/5. Thanks for rating!"));
            }
            KeyCode::Char('m') => {
                play.muted = !play.muted;
                let message = if play.muted { "Sound muted" } else { "Sound on" };
                self.set_status(message.to_string());
            }
            KeyCode::Char('r') => {
                play.restart();
                let message = format!("Restarted {}", play.game.title);
                self.set_status(message);
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('j') | KeyCode::Down => {
                play.suggested_cursor = step(play.suggested_cursor, 1, play.suggested.len());
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('k') | KeyCode::Up => {
                play.suggested_cursor = step(play.suggested_cursor, -1, play.suggested.len());
            }
            KeyCode::Enter => {
                if let Some(id) = play
                    .suggested
                    .get(play.suggested_cursor)
                    .map(|game| game.id.clone())
                {
                    self.play = None;
                    self.open_detail(&id);
                }
            }
            _ => {}
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

/// Move `cursor` by `delta`, clamped to `0..len`.
fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let idx = (cursor as isize + delta).clamp(0, len as isize - 1);
    idx as usize
}

/// Range of `len` items of which at most `capacity` fit, keeping `cursor` inside.
fn visible_window(len: usize, cursor: usize, capacity: usize) -> (usize, usize) {
    let capacity = capacity.max(1);
    if len <= capacity {
        return (0, len);
    }
    let start = cursor
        .saturating_sub(capacity / 2)
        .min(len - capacity);
    (start, start + capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamehub_core::{
        catalog::BuiltinSource,
        models::Category,
        storage::{KeyValueStore, MemoryStore},
    };
    use std::sync::Arc;

    fn app() -> GameHubApp {
        let store = CatalogStore::load(&BuiltinSource)
            .expect("builtin catalog")
            .with_storage(Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>);
        GameHubApp::new(store, Theme::default(), "built-in catalog".to_string())
    }

    fn press(app: &mut GameHubApp, code: KeyCode) {
        app.handle_input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .expect("key handled");
    }

    #[test]
    fn step_clamps_to_bounds() {
        assert_eq!(step(0, -1, 5), 0);
        assert_eq!(step(4, 1, 5), 4);
        assert_eq!(step(2, 3, 5), 4);
        assert_eq!(step(3, 0, 0), 0);
    }

    #[test]
    fn window_keeps_cursor_visible() {
        assert_eq!(visible_window(3, 2, 5), (0, 3));
        assert_eq!(visible_window(8, 0, 4), (0, 4));
        assert_eq!(visible_window(8, 5, 4), (3, 7));
        assert_eq!(visible_window(8, 7, 4), (4, 8));
        assert_eq!(visible_window(8, 3, 0), (3, 4));
    }

    #[test]
    fn opening_a_game_fills_recently_played() {
        let mut app = app();
        assert!(app.recent.is_empty());
        assert_eq!(app.home.section, HomeSection::Trending);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Detail);
        assert_eq!(app.detail.as_ref().unwrap().game_id, "4");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.recent.len(), 1);
        assert_eq!(app.recent[0].id, "4");
    }

    #[test]
    fn unknown_game_shows_fallback() {
        let mut app = app();
        app.open_on_start("404");
        let detail = app.detail.as_ref().unwrap();
        assert!(detail.game.is_none());
        assert_eq!(app.screen, Screen::Detail);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.screen, Screen::Detail);
        assert!(app.store.recently_played().is_empty());
    }

    #[test]
    fn play_page_rates_and_returns_to_detail() {
        let mut app = app();
        app.open_on_start("6");
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.screen, Screen::Play);

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.play.as_ref().unwrap().rating, Some(4));
        assert_eq!(app.screen, Screen::Play);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Detail);
        assert_eq!(app.detail.as_ref().unwrap().game_id, "6");
    }

    #[test]
    fn home_filter_cycles_all_games_row() {
        let mut app = app();
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.home.filter, CategoryFilter::Only(Category::Action));
        assert_eq!(app.home.section, HomeSection::AllGames);
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.home.filter, CategoryFilter::Only(Category::Strategy));
    }

    #[test]
    fn release_search_narrows_results() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.screen, Screen::Releases);

        press(&mut app, KeyCode::Char('/'));
        for ch in "ocean".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Browse);
        let results = app.release_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Ocean Explorer");

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.release_results().len(), 6);
    }

    #[test]
    fn typing_q_while_searching_does_not_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.releases.query.search, "q");
    }

    #[test]
    fn categories_drill_in_and_out() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.categories.selected,
            Some(CategoryFilter::Only(Category::Adventure))
        );
        assert_eq!(app.category_games().len(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.categories.selected, None);
        assert_eq!(app.screen, Screen::Categories);
    }
}

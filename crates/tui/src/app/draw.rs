use gamehub_core::{
    catalog::CategoryStats,
    format::{format_play_count, format_rating, format_thousands},
    models::{CategoryFilter, Game},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
    Frame,
};

use super::{visible_window, GameHubApp, HomeSection, Mode, PlayState, Screen, ViewMode};
use crate::theme::Theme;

const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 5;
const HERO_HEIGHT: u16 = 6;
// ticks between hero spotlight changes
const HERO_ROTATE_TICKS: u64 = 24;

impl GameHubApp {
    pub(super) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(area);

        self.render_tabs(frame, layout[0]);
        match self.screen {
            Screen::Home => self.draw_home(frame, layout[1]),
            Screen::Categories => self.draw_categories(frame, layout[1]),
            Screen::Releases => self.draw_releases(frame, layout[1]),
            Screen::Detail => self.draw_detail(frame, layout[1]),
            Screen::Play => self.draw_play(frame, layout[1]),
        }
        self.render_status(frame, layout[2]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles = ["1 Home", "2 Categories", "3 New Releases"];
        let tabs = Tabs::new(titles)
            .select(self.root.tab_index().unwrap_or(0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        " 🎮 GameHub ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )),
            )
            .style(Style::default().fg(self.theme.muted))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│");
        frame.render_widget(tabs, area);
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect) {
        let rows = self.home_rows();
        let mut constraints = vec![Constraint::Length(HERO_HEIGHT)];
        constraints.extend(
            rows.iter()
                .map(|_| Constraint::Ratio(1, rows.len() as u32)),
        );
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.render_hero(frame, layout[0]);
        for (idx, (section, games)) in rows.iter().enumerate() {
            self.render_card_row(frame, layout[idx + 1], *section, games);
        }
    }

    fn render_hero(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.accent_alt))
            .title(" Featured ");
        let featured = self.store.featured();
        if featured.is_empty() {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "Welcome to GameHub",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )))
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let spotlight = (self.ticks / HERO_ROTATE_TICKS) as usize % featured.len();
        let game = &featured[spotlight];
        let mut others = Vec::new();
        for (idx, other) in featured.iter().enumerate() {
            if idx > 0 {
                others.push(Span::styled(" • ", Style::default().fg(self.theme.muted)));
            }
            let style = if idx == spotlight {
                Style::default()
                    .fg(self.theme.accent_alt)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            others.push(Span::styled(other.title.clone(), style));
        }

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    " FEATURED ",
                    Style::default()
                        .fg(self.theme.on_accent)
                        .bg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    game.title.clone(),
                    Style::default()
                        .fg(self.theme.primary_fg)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                game.description.clone(),
                Style::default().fg(self.theme.primary_fg),
            )),
            Line::from(Span::styled(
                format!(
                    "{} {} · {} plays · ★ {}",
                    game.category.icon(),
                    game.category,
                    format_play_count(game.plays),
                    format_rating(game.rating)
                ),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(others),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_card_row(
        &self,
        frame: &mut Frame,
        area: Rect,
        section: HomeSection,
        games: &[Game],
    ) {
        let active = section == self.home.section;
        let accent = if active {
            self.theme.accent
        } else {
            self.theme.muted
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {} ", section.title()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cards_area = if section == HomeSection::AllGames {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(inner);
            let pills = category_pills(&self.theme, self.home.filter);
            frame.render_widget(Paragraph::new(Line::from(pills)), split[0]);
            split[1]
        } else {
            inner
        };

        if games.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No games in this category",
                Style::default().fg(self.theme.muted),
            ));
            frame.render_widget(empty, cards_area);
            return;
        }
        let cursor = self.home.cursor(section);
        render_card_strip(
            &self.theme,
            frame,
            cards_area,
            games,
            active.then_some(cursor),
            cursor,
        );
    }

    fn draw_categories(&mut self, frame: &mut Frame, area: Rect) {
        match self.categories.selected {
            None => self.render_category_overview(frame, area),
            Some(filter) => self.render_category_games(frame, area, filter),
        }
    }

    fn render_category_overview(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
            .split(area);

        let mut list_state = ListState::default();
        if !self.stats.is_empty() {
            list_state.select(Some(self.categories.cursor.min(self.stats.len() - 1)));
        }
        let items: Vec<ListItem> = self
            .stats
            .iter()
            .map(|stat| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", stat.category.icon())),
                    Span::styled(
                        format!("{:<10}", stat.category.name()),
                        Style::default()
                            .fg(self.theme.primary_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" {} games", stat.game_count),
                        Style::default().fg(self.theme.muted),
                    ),
                ]))
            })
            .collect();
        let total_plays: u64 = self.stats.iter().map(|stat| stat.total_plays).sum();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(
                        " Categories · {} games · {} plays ",
                        self.store.len(),
                        format_play_count(total_plays)
                    )),
            )
            .highlight_style(
                Style::default()
                    .bg(self.theme.selection_bg)
                    .fg(self.theme.accent),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, layout[0], &mut list_state);

        match self.stats.get(self.categories.cursor) {
            Some(stat) => self.render_category_card(frame, layout[1], stat),
            None => frame.render_widget(Block::default().borders(Borders::ALL), layout[1]),
        }
    }

    fn render_category_card(&self, frame: &mut Frame, area: Rect, stat: &CategoryStats) {
        let label = Style::default().fg(self.theme.muted);
        let value = Style::default().fg(self.theme.primary_fg);
        let avg = stat
            .avg_rating
            .map(format_rating)
            .unwrap_or_else(|| "-".to_string());
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Games          ", label),
                Span::styled(stat.game_count.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Total plays    ", label),
                Span::styled(format_thousands(stat.total_plays), value),
            ]),
            Line::from(vec![
                Span::styled("Average rating ", label),
                Span::styled(format!("★ {avg}"), Style::default().fg(self.theme.highlight)),
            ]),
            Line::from(vec![
                Span::styled("Cover          ", label),
                Span::styled(stat.thumbnail.clone(), label),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "Popular games",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        if stat.top_games.is_empty() {
            lines.push(Line::from(Span::styled("  Nothing here yet", label)));
        }
        for game in &stat.top_games {
            lines.push(Line::from(vec![
                Span::styled(format!("  • {}", game.title), value),
                Span::styled(
                    format!(
                        "  ★ {}  ▶ {}",
                        format_rating(game.rating),
                        format_play_count(game.plays)
                    ),
                    label,
                ),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Enter to browse · a for all games",
            Style::default().fg(self.theme.highlight),
        )));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.accent))
                    .title(format!(" {} {} ", stat.category.icon(), stat.category)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_category_games(&mut self, frame: &mut Frame, area: Rect, filter: CategoryFilter) {
        let games = self.category_games();
        let view = match self.categories.view_mode {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        };
        let heading = match filter {
            CategoryFilter::All => "All Games".to_string(),
            CategoryFilter::Only(category) => format!("{} {category} Games", category.icon()),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title(format!(" {heading} · {} found · {view} view ", games.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if games.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(Span::styled(
                    "No games found in this category",
                    Style::default().fg(self.theme.muted),
                )),
                Line::from(Span::styled(
                    "Esc to pick another category",
                    Style::default().fg(self.theme.highlight),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(empty, centered_rect(inner.width, 2, inner));
            return;
        }

        let cursor = self.categories.game_cursor.min(games.len() - 1);
        match self.categories.view_mode {
            ViewMode::Grid => {
                let columns = (inner.width / CARD_WIDTH).max(1) as usize;
                self.categories.grid_columns = columns;
                let total_rows = games.len().div_ceil(columns);
                let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
                let (first, last) = visible_window(total_rows, cursor / columns, visible_rows);
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(vec![Constraint::Length(CARD_HEIGHT); last - first])
                    .split(inner);
                for (slot, row) in (first..last).enumerate() {
                    let start = row * columns;
                    let end = (start + columns).min(games.len());
                    let cells = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints(vec![Constraint::Length(CARD_WIDTH); columns])
                        .split(rows[slot]);
                    for (cell, idx) in (start..end).enumerate() {
                        render_card(&self.theme, frame, cells[cell], &games[idx], idx == cursor);
                    }
                }
            }
            ViewMode::List => {
                let mut list_state = ListState::default();
                list_state.select(Some(cursor));
                let items: Vec<ListItem> = games
                    .iter()
                    .map(|game| game_list_item(&self.theme, game, None))
                    .collect();
                let list = List::new(items)
                    .highlight_style(Style::default().bg(self.theme.selection_bg))
                    .highlight_symbol("▶ ");
                frame.render_stateful_widget(list, inner, &mut list_state);
            }
        }
    }

    fn draw_releases(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(3)])
            .split(area);

        let query = &self.releases.query;
        let label = Style::default().fg(self.theme.muted);
        let search_line = if self.mode == Mode::Search {
            Line::from(vec![
                Span::styled("Search   ", label),
                Span::styled(
                    format!("{}▏", query.search),
                    Style::default()
                        .fg(self.theme.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        } else if query.search.is_empty() {
            Line::from(vec![
                Span::styled("Search   ", label),
                Span::styled("press / to search games", label),
            ])
        } else {
            Line::from(vec![
                Span::styled("Search   ", label),
                Span::styled(query.search.clone(), Style::default().fg(self.theme.primary_fg)),
            ])
        };
        let mut category_line = vec![Span::styled("Category ", label)];
        category_line.extend(category_pills(&self.theme, query.category));
        let sort_line = Line::from(vec![
            Span::styled("Sort     ", label),
            Span::styled(
                query.sort.to_string(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({})", query.direction), label),
        ]);
        let filters = Paragraph::new(vec![search_line, Line::from(category_line), sort_line])
            .block(Block::default().borders(Borders::ALL).title(" Filters "));
        frame.render_widget(filters, layout[0]);

        let results = self.release_results();
        let mut title = vec![Span::styled(
            format!(" {} games ", results.len()),
            Style::default()
                .fg(self.theme.primary_fg)
                .add_modifier(Modifier::BOLD),
        )];
        if !query.is_unfiltered() {
            if let CategoryFilter::Only(category) = query.category {
                title.push(badge(&self.theme, &format!("{} {category}", category.icon())));
                title.push(Span::raw(" "));
            }
            if !query.search.trim().is_empty() {
                title.push(badge(&self.theme, &format!("\"{}\"", query.search.trim())));
                title.push(Span::raw(" "));
            }
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title));

        if results.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(Span::styled(
                    "No games match your filters",
                    Style::default().fg(self.theme.muted),
                )),
                Line::from(Span::styled(
                    "x to clear filters",
                    Style::default().fg(self.theme.highlight),
                )),
            ])
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(empty, layout[1]);
            return;
        }

        let mut list_state = ListState::default();
        list_state.select(Some(self.releases.cursor.min(results.len() - 1)));
        let items: Vec<ListItem> = results
            .iter()
            .enumerate()
            .map(|(idx, game)| game_list_item(&self.theme, game, Some(idx + 1)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, layout[1], &mut list_state);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect) {
        let Some(detail) = &self.detail else {
            return;
        };
        let Some(game) = &detail.game else {
            let lines = vec![
                Line::from(Span::styled(
                    "Game Not Found",
                    Style::default()
                        .fg(self.theme.danger)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(format!(
                    "No game with id \"{}\" exists in the catalog.",
                    detail.game_id
                )),
                Line::from(Span::styled(
                    "Esc to go back",
                    Style::default().fg(self.theme.highlight),
                )),
            ];
            let popup = centered_rect(52, 6, area);
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                popup,
            );
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(CARD_HEIGHT + 2)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(layout[0]);

        let mut header = vec![Span::styled(
            format!("{} {}", game.category.icon(), game.category),
            Style::default().fg(self.theme.accent),
        )];
        if game.featured {
            header.push(Span::raw("  "));
            header.push(badge(&self.theme, "★ Featured"));
        }
        let play_line = if game.is_playable() {
            Line::from(Span::styled(
                "▶ Play Now  (p)",
                Style::default()
                    .fg(self.theme.success)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "Not available to play",
                Style::default().fg(self.theme.muted),
            ))
        };
        let like_line = if detail.liked {
            Line::from(Span::styled("♥ Liked  (f)", Style::default().fg(self.theme.danger)))
        } else {
            Line::from(Span::styled("♡ Like  (f)", Style::default().fg(self.theme.muted)))
        };
        let main = Paragraph::new(vec![
            Line::from(header),
            Line::default(),
            Line::from(game.description.clone()),
            Line::default(),
            play_line,
            like_line,
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.accent))
                .title(Span::styled(
                    format!(" {} ", game.title),
                    Style::default()
                        .fg(self.theme.primary_fg)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .wrap(Wrap { trim: true });
        frame.render_widget(main, top[0]);

        let label = Style::default().fg(self.theme.muted);
        let side = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Rating       ", label),
                Span::styled(
                    format!("★ {}", format_rating(game.rating)),
                    Style::default().fg(self.theme.highlight),
                ),
            ]),
            Line::from(vec![
                Span::styled("Plays        ", label),
                Span::raw(format_play_count(game.plays)),
            ]),
            Line::from(vec![
                Span::styled("Playing now  ", label),
                Span::raw(format_thousands(game.active_players())),
            ]),
            Line::default(),
            Line::from(Span::styled("Thumbnail", label)),
            Line::from(game.thumbnail.clone()),
            Line::from(Span::styled("Game URL", label)),
            Line::from(game.game_url.clone().unwrap_or_else(|| "-".to_string())),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Game Info "))
        .wrap(Wrap { trim: true });
        frame.render_widget(side, top[1]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" You Might Also Like  (h/l, o to open) ");
        let inner = block.inner(layout[1]);
        frame.render_widget(block, layout[1]);
        render_card_strip(
            &self.theme,
            frame,
            inner,
            &detail.related,
            Some(detail.related_cursor),
            detail.related_cursor,
        );
    }

    fn draw_play(&self, frame: &mut Frame, area: Rect) {
        let Some(play) = &self.play else {
            return;
        };
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
            .split(area);
        self.render_game_frame(frame, layout[0], play);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Min(3),
            ])
            .split(layout[1]);
        self.render_rating_panel(frame, sidebar[0], play);

        let label = Style::default().fg(self.theme.muted);
        let stats = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Category ", label),
                Span::raw(format!("{} {}", play.game.category.icon(), play.game.category)),
            ]),
            Line::from(vec![
                Span::styled("Rating   ", label),
                Span::styled(
                    format!("★ {}", format_rating(play.game.rating)),
                    Style::default().fg(self.theme.highlight),
                ),
            ]),
            Line::from(vec![
                Span::styled("Plays    ", label),
                Span::raw(format_thousands(play.game.plays)),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Game Stats "));
        frame.render_widget(stats, sidebar[1]);

        let mut list_state = ListState::default();
        if !play.suggested.is_empty() {
            list_state.select(Some(play.suggested_cursor.min(play.suggested.len() - 1)));
        }
        let items: Vec<ListItem> = play
            .suggested
            .iter()
            .map(|game| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        game.title.clone(),
                        Style::default()
                            .fg(self.theme.primary_fg)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {} · ★ {}", game.category, format_rating(game.rating)),
                        label,
                    )),
                ])
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" More Games "))
            .highlight_style(Style::default().bg(self.theme.selection_bg))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, sidebar[2], &mut list_state);
    }

    fn render_game_frame(&self, frame: &mut Frame, area: Rect, play: &PlayState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(self.theme.accent))
            .title(Span::styled(
                format!(" ▶ {} ", play.game.title),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .title(
                Title::from(Span::styled(
                    " arrows/WASD move · space action · m mute · r restart · Esc back ",
                    Style::default().fg(self.theme.muted),
                ))
                .position(Position::Bottom),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let sound = if play.muted { "🔇 muted" } else { "🔊 on" };
        let url = play.game.game_url.as_deref().unwrap_or("-");
        let lines = vec![
            Line::from(Span::styled(
                play.game.title.to_uppercase(),
                Style::default()
                    .fg(self.theme.accent_alt)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from("Game demo running"),
            Line::from(Span::styled(
                format!("The playable build would load from {url}"),
                Style::default().fg(self.theme.muted),
            )),
            Line::default(),
            Line::from(format!(
                "Session {}  ·  Restarts {}  ·  Sound {sound}",
                play.elapsed_label(),
                play.restarts
            )),
        ];
        let height = (lines.len() as u16).min(inner.height);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, centered_rect(inner.width, height, inner));
    }

    fn render_rating_panel(&self, frame: &mut Frame, area: Rect, play: &PlayState) {
        let given = play.rating.unwrap_or(0);
        let stars: Vec<Span> = (1..=5u8)
            .map(|star| {
                if star <= given {
                    Span::styled("★ ", Style::default().fg(self.theme.highlight))
                } else {
                    Span::styled("☆ ", Style::default().fg(self.theme.muted))
                }
            })
            .collect();
        let note = match play.rating {
            Some(_) => Line::from(Span::styled(
                "Thanks for rating!",
                Style::default().fg(self.theme.success),
            )),
            None => Line::from(Span::styled(
                "Press 1-5 to rate",
                Style::default().fg(self.theme.muted),
            )),
        };
        let paragraph = Paragraph::new(vec![Line::from(stars), note])
            .block(Block::default().borders(Borders::ALL).title(" Rate This Game "))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = if self.mode == Mode::Search {
            format!("Search: {}", self.releases.query.search)
        } else {
            self.status.clone()
        };
        let hints = match self.screen {
            Screen::Home => "j/k section · h/l card · [/] category · Enter open",
            Screen::Categories if self.categories.selected.is_some() => {
                "arrows move · v grid/list · Enter open · Esc back"
            }
            Screen::Categories => "j/k move · Enter open · a all games · Esc home",
            Screen::Releases if self.mode == Mode::Search => {
                "type to search · Enter apply · Esc clear"
            }
            Screen::Releases => "/ search · c category · s sort · d direction · x clear",
            Screen::Detail => "p play · f like · h/l related · Esc back",
            Screen::Play => "1-5 rate · m mute · r restart · Enter open suggestion · Esc back",
        };
        let history = if self.store.has_storage() {
            "history on"
        } else {
            "history off"
        };
        let secondary = Line::from(vec![
            Span::styled(hints, Style::default().fg(self.theme.highlight)),
            Span::styled(
                format!("  │ {} · {history} · q quit", self.source_label),
                Style::default().fg(self.theme.muted),
            ),
        ]);
        let paragraph = Paragraph::new(vec![Line::from(primary), secondary])
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// Horizontal run of cards, scrolled so `cursor` stays visible.
fn render_card_strip(
    theme: &Theme,
    frame: &mut Frame,
    area: Rect,
    games: &[Game],
    selected: Option<usize>,
    cursor: usize,
) {
    if games.is_empty() || area.width == 0 {
        return;
    }
    let capacity = (area.width / CARD_WIDTH).max(1) as usize;
    let (start, end) = visible_window(games.len(), cursor, capacity);
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(CARD_WIDTH); end - start])
        .split(area);
    for (slot, idx) in (start..end).enumerate() {
        let card_area = Rect {
            height: cells[slot].height.min(CARD_HEIGHT),
            ..cells[slot]
        };
        render_card(theme, frame, card_area, &games[idx], selected == Some(idx));
    }
}

fn render_card(theme: &Theme, frame: &mut Frame, area: Rect, game: &Game, selected: bool) {
    let border_color = if selected {
        theme.accent
    } else if game.featured {
        theme.accent_alt
    } else {
        theme.muted
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Double
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            game.title.clone(),
            Style::default()
                .fg(theme.primary_fg)
                .add_modifier(Modifier::BOLD),
        ));
    if selected {
        block = block.style(Style::default().bg(theme.selection_bg));
    }
    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", game.category.icon(), game.category),
            Style::default().fg(theme.muted),
        )),
        Line::from(vec![
            Span::raw(format!("▶ {}", format_play_count(game.plays))),
            Span::raw("  "),
            Span::styled(
                format!("★ {}", format_rating(game.rating)),
                Style::default().fg(theme.highlight),
            ),
        ]),
        if game.featured {
            Line::from(Span::styled("FEATURED", Style::default().fg(theme.accent_alt)))
        } else {
            Line::default()
        },
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn game_list_item<'a>(theme: &Theme, game: &'a Game, rank: Option<usize>) -> ListItem<'a> {
    let mut spans = Vec::with_capacity(5);
    if let Some(rank) = rank {
        spans.push(Span::styled(
            format!("#{rank:<3}"),
            Style::default().fg(theme.muted),
        ));
    }
    spans.push(Span::styled(
        format!("{:<18}", game.title),
        Style::default()
            .fg(theme.primary_fg)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        format!(" {} {:<10}", game.category.icon(), game.category.name()),
        Style::default().fg(theme.muted),
    ));
    spans.push(Span::styled(
        format!(" ★ {}", format_rating(game.rating)),
        Style::default().fg(theme.highlight),
    ));
    spans.push(Span::raw(format!("  ▶ {}", format_play_count(game.plays))));
    ListItem::new(Line::from(spans))
}

fn category_pills(theme: &Theme, active: CategoryFilter) -> Vec<Span<'static>> {
    CategoryFilter::options()
        .into_iter()
        .flat_map(|option| {
            let style = if option == active {
                Style::default()
                    .fg(theme.on_accent)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            [Span::styled(format!(" {option} "), style), Span::raw(" ")]
        })
        .collect()
}

fn badge(theme: &Theme, text: &str) -> Span<'static> {
    Span::styled(
        format!(" {text} "),
        Style::default()
            .fg(theme.on_accent)
            .bg(theme.accent_alt)
            .add_modifier(Modifier::BOLD),
    )
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

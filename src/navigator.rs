use log::{debug, info};
use std::ops::Range;

use crate::alphabet::{Alphabet, build_alphabet};
use crate::automaton::{DispatchTable, InputAutomaton, PendingInput, Step};
use crate::color::{ColorTable, Hsl};
use crate::config::TreehopConfig;
use crate::error::HintError;
use crate::label::{encode_padded, label_width};
use crate::search::{Registry, search};
use crate::syntax::SyntaxTree;

/// The text-editing surface: what is visible and where the cursor is.
pub trait ViewportProvider {
    fn visible_range(&self) -> Range<usize>;
    fn goto_offset(&mut self, offset: usize);
}

/// Draws and removes hint markers. The renderer keeps whatever handles it needs
/// to honor `clear_all`.
pub trait HintRenderer<N> {
    fn clear_all(&mut self);
    fn draw(&mut self, node: N, label: &str, color: Hsl);
}

pub enum InputHandler<'a> {
    Default,
    Hints(&'a DispatchTable),
}

pub trait InputSurface {
    fn install(&mut self, handler: InputHandler<'_>);
}

pub trait EditorHost<N>: ViewportProvider + HintRenderer<N> + InputSurface {}

impl<N, T> EditorHost<N> for T where T: ViewportProvider + HintRenderer<N> + InputSurface {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not consumed by hint navigation.
    Ignored,
    Pending { level: usize },
    Jumped { offset: usize },
    Ascended,
    Suspended,
    /// The host should scroll and then report the new viewport.
    ScrollRequested(ScrollDirection),
}

pub struct Session<S: SyntaxTree> {
    syntax: S,
    focus: S::Node,
    registry: Registry<S::Node>,
    pending: PendingInput,
}

impl<S: SyntaxTree> Session<S> {
    pub fn syntax(&self) -> &S {
        &self.syntax
    }

    pub fn focus(&self) -> S::Node {
        self.focus
    }

    pub fn registry(&self) -> &Registry<S::Node> {
        &self.registry
    }
}

pub enum NavState<S: SyntaxTree> {
    Inactive,
    Active(Session<S>),
}

/// Hint navigation state machine for one editing session.
pub struct Navigator<S: SyntaxTree> {
    config: TreehopConfig,
    state: NavState<S>,
    automaton: Option<InputAutomaton>,
    colors: Option<ColorTable>,
}

impl<S: SyntaxTree> Navigator<S> {
    pub fn new(config: TreehopConfig) -> Self {
        Self {
            config,
            state: NavState::Inactive,
            automaton: None,
            colors: None,
        }
    }

    pub fn config(&self) -> &TreehopConfig {
        &self.config
    }

    /// Replaces the configuration; the next recomputation picks it up.
    pub fn set_config(&mut self, config: TreehopConfig) {
        self.config = config;
    }

    pub fn state(&self) -> &NavState<S> {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, NavState::Active(_))
    }

    pub fn session(&self) -> Option<&Session<S>> {
        match &self.state {
            NavState::Active(session) => Some(session),
            NavState::Inactive => None,
        }
    }

    pub fn focus(&self) -> Option<S::Node> {
        self.session().map(|session| session.focus)
    }

    /// Labels of the current registry, in index order.
    pub fn labels(&self) -> Vec<String> {
        let (Some(session), Some(automaton)) = (self.session(), self.automaton.as_ref()) else {
            return Vec::new();
        };
        (0..session.registry.len())
            .map(|index| encode_padded(index, automaton.width(), automaton.alphabet()))
            .collect()
    }

    /// Enters hint mode over the whole visible tree. `syntax` is `None` when the
    /// buffer has no parser; the navigator then stays inactive.
    pub fn activate<H>(&mut self, syntax: Option<S>, host: &mut H) -> Result<(), HintError>
    where
        H: EditorHost<S::Node>,
    {
        let syntax = syntax.ok_or(HintError::NoParserAvailable)?;
        self.prepare_alphabet()?;
        let focus = syntax.root();
        let width = self.automaton.as_ref().map_or(1, InputAutomaton::width);
        self.state = NavState::Active(Session {
            syntax,
            focus,
            registry: Registry::empty(),
            pending: PendingInput::new(width),
        });
        info!("hint navigation activated");
        self.refresh(host)
    }

    pub fn handle_key<H>(&mut self, key: char, host: &mut H) -> Result<KeyOutcome, HintError>
    where
        H: EditorHost<S::Node>,
    {
        if !self.is_active() {
            return Ok(KeyOutcome::Ignored);
        }
        let keys = self.config.keys.clone();
        if key == keys.ascend {
            self.ascend(host)?;
            return Ok(KeyOutcome::Ascended);
        }
        if key == keys.suspend {
            self.suspend(host);
            return Ok(KeyOutcome::Suspended);
        }
        if key == keys.scroll_down {
            return Ok(KeyOutcome::ScrollRequested(ScrollDirection::Down));
        }
        if key == keys.scroll_up {
            return Ok(KeyOutcome::ScrollRequested(ScrollDirection::Up));
        }

        let (NavState::Active(session), Some(automaton)) = (&mut self.state, &self.automaton)
        else {
            return Ok(KeyOutcome::Ignored);
        };
        match session.pending.feed(automaton, key) {
            Step::Advanced { level } => {
                if let Some(table) = automaton.dispatch(level) {
                    host.install(InputHandler::Hints(table));
                }
                Ok(KeyOutcome::Pending { level })
            }
            Step::Resolved(index) => self.jump(index, host),
            Step::Rejected => {
                debug!("key {:?} matches no hint, input reset", key);
                if let Some(table) = automaton.dispatch(automaton.width()) {
                    host.install(InputHandler::Hints(table));
                }
                Ok(KeyOutcome::Ignored)
            }
        }
    }

    /// Moves focus to the top-level item that contains the current focus.
    pub fn ascend<H>(&mut self, host: &mut H) -> Result<(), HintError>
    where
        H: EditorHost<S::Node>,
    {
        let NavState::Active(session) = &mut self.state else {
            return Ok(());
        };
        let root = session.syntax.root();
        let mut target = session.focus;
        if target != root && session.syntax.parent(target) != Some(root) {
            while let Some(parent) = session.syntax.parent(target) {
                if parent == root {
                    break;
                }
                target = parent;
            }
        } else {
            target = root;
        }
        session.focus = target;
        debug!("ascended to {}", session.syntax.kind(target));
        self.refresh(host)
    }

    /// Restarts the search below `node`, which must belong to the active tree.
    pub fn refocus<H>(&mut self, node: S::Node, host: &mut H) -> Result<(), HintError>
    where
        H: EditorHost<S::Node>,
    {
        let NavState::Active(session) = &mut self.state else {
            return Ok(());
        };
        session.focus = node;
        debug!("refocused on {}", session.syntax.kind(node));
        self.refresh(host)
    }

    /// Re-evaluates the whole visible tree after the viewport moved.
    pub fn viewport_changed<H>(&mut self, host: &mut H) -> Result<(), HintError>
    where
        H: EditorHost<S::Node>,
    {
        let NavState::Active(session) = &mut self.state else {
            return Ok(());
        };
        session.focus = session.syntax.root();
        self.refresh(host)
    }

    pub fn suspend<H>(&mut self, host: &mut H)
    where
        H: EditorHost<S::Node>,
    {
        if !self.is_active() {
            return;
        }
        host.clear_all();
        host.install(InputHandler::Default);
        self.state = NavState::Inactive;
        info!("hint navigation suspended");
    }

    fn jump<H>(&mut self, index: usize, host: &mut H) -> Result<KeyOutcome, HintError>
    where
        H: EditorHost<S::Node>,
    {
        let NavState::Active(session) = &mut self.state else {
            return Ok(KeyOutcome::Ignored);
        };
        let Some(node) = session.registry.get(index) else {
            debug!("label index {} has no hint", index);
            if let Some(table) = self
                .automaton
                .as_ref()
                .and_then(|automaton| automaton.dispatch(automaton.width()))
            {
                host.install(InputHandler::Hints(table));
            }
            return Ok(KeyOutcome::Ignored);
        };
        let offset = session.syntax.start(node);
        host.goto_offset(offset);
        let focus = session
            .syntax
            .parent(node)
            .unwrap_or_else(|| session.syntax.root());
        info!("jumped to offset {} (hint {})", offset, index);
        self.refocus(focus, host)?;
        Ok(KeyOutcome::Jumped { offset })
    }

    /// Rebuilds the automaton only when the alphabet itself changed.
    fn prepare_alphabet(&mut self) -> Result<(), HintError> {
        let alphabet: Alphabet = build_alphabet(
            self.config.hints.ordered_rows(),
            &self.config.keys.reserved(),
        )?;
        let stale = self
            .automaton
            .as_ref()
            .is_none_or(|automaton| automaton.alphabet() != &alphabet);
        if stale {
            debug!("hint alphabet changed (radix={})", alphabet.radix());
            self.automaton = Some(InputAutomaton::new(alphabet));
        }
        Ok(())
    }

    fn prepare_colors(&mut self) -> Result<(), HintError> {
        let Some(automaton) = self.automaton.as_ref() else {
            return Ok(());
        };
        let colors = &self.config.colors;
        let anchor = Hsl::from_hex(&colors.background)?;
        let capacity = self.config.hints.max_hints;
        let current = self.colors.as_ref().is_some_and(|table| {
            table.is_current(
                anchor,
                &colors.seed,
                &colors.params,
                automaton.alphabet(),
                capacity,
            )
        });
        if !current {
            debug!("color table rebuilt (capacity={})", capacity);
            self.colors = Some(ColorTable::build(
                anchor,
                &colors.seed,
                &colors.params,
                automaton.alphabet(),
                capacity,
            ));
        }
        Ok(())
    }

    /// Recomputes registry, automaton, colors and hints for the current focus.
    fn refresh<H>(&mut self, host: &mut H) -> Result<(), HintError>
    where
        H: EditorHost<S::Node>,
    {
        if !self.is_active() {
            return Ok(());
        }
        if let Err(err) = self.prepare_alphabet().and_then(|()| self.prepare_colors()) {
            self.suspend(host);
            return Err(err);
        }
        let limits = self.config.hints.limits();
        let (NavState::Active(session), Some(automaton), Some(colors)) =
            (&mut self.state, self.automaton.as_mut(), self.colors.as_ref())
        else {
            return Ok(());
        };

        let viewport = host.visible_range();
        session.registry = search(&session.syntax, session.focus, viewport, limits);
        let width = label_width(session.registry.len(), automaton.alphabet().radix());
        automaton.configure(width);
        session.pending = PendingInput::new(width);

        host.clear_all();
        for (index, node) in session.registry.nodes().iter().enumerate() {
            let label = encode_padded(index, width, automaton.alphabet());
            let color = colors.get(index).unwrap_or(Hsl::new(0.0, 0.0, 1.0));
            host.draw(*node, &label, color);
        }
        if let Some(table) = automaton.dispatch(width) {
            host.install(InputHandler::Hints(table));
        }
        info!(
            "hints drawn (focus={}, hints={}, width={})",
            session.syntax.kind(session.focus),
            session.registry.len(),
            width
        );
        Ok(())
    }
}

/// Event recorded by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent<N> {
    Cleared,
    Drawn { node: N, label: String, color: Hsl },
    Installed(Option<usize>),
    Moved(usize),
}

/// Headless host that keeps a fixed viewport and records every call.
#[derive(Debug, Clone)]
pub struct RecordingHost<N> {
    pub viewport: Range<usize>,
    pub cursor: usize,
    pub hints: Vec<(N, String, Hsl)>,
    pub installed: Option<usize>,
    pub events: Vec<HostEvent<N>>,
}

impl<N: Clone> RecordingHost<N> {
    pub fn new(viewport: Range<usize>) -> Self {
        Self {
            viewport,
            cursor: 0,
            hints: Vec::new(),
            installed: None,
            events: Vec::new(),
        }
    }
}

impl<N> ViewportProvider for RecordingHost<N> {
    fn visible_range(&self) -> Range<usize> {
        self.viewport.clone()
    }

    fn goto_offset(&mut self, offset: usize) {
        self.cursor = offset;
        self.events.push(HostEvent::Moved(offset));
    }
}

impl<N: Clone> HintRenderer<N> for RecordingHost<N> {
    fn clear_all(&mut self) {
        self.hints.clear();
        self.events.push(HostEvent::Cleared);
    }

    fn draw(&mut self, node: N, label: &str, color: Hsl) {
        self.hints.push((node.clone(), label.to_string(), color));
        self.events.push(HostEvent::Drawn {
            node,
            label: label.to_string(),
            color,
        });
    }
}

impl<N> InputSurface for RecordingHost<N> {
    fn install(&mut self, handler: InputHandler<'_>) {
        let level = match handler {
            InputHandler::Default => None,
            InputHandler::Hints(table) => Some(table.level()),
        };
        self.installed = level;
        self.events.push(HostEvent::Installed(level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::testing::FakeTree;
    use std::collections::BTreeMap;

    fn tree() -> FakeTree {
        let mut tree = FakeTree::new(0, 100);
        let item = tree.add(0, "item", None, 0, 50);
        tree.add(item, "ident", Some("name"), 5, 9);
        let block = tree.add(item, "block", Some("body"), 10, 50);
        let stmt = tree.add(block, "stmt", None, 12, 30);
        tree.add(stmt, "ident", Some("pattern"), 16, 20);
        tree.add(stmt, "lit", Some("value"), 23, 25);
        tree.add(block, "lit", Some("value"), 35, 40);
        let second = tree.add(0, "item", None, 60, 99);
        tree.add(second, "ident", Some("name"), 63, 70);
        tree
    }

    const ITEM: usize = 1;
    const STMT: usize = 4;

    fn config(row: &str) -> TreehopConfig {
        let mut config = TreehopConfig::default();
        config.hints.rows = BTreeMap::from([("home".to_string(), row.to_string())]);
        config.hints.row_order = vec!["home".to_string()];
        config
    }

    fn drawn_starts(tree: &FakeTree, host: &RecordingHost<usize>) -> Vec<usize> {
        host.hints.iter().map(|(node, _, _)| tree.start(*node)).collect()
    }

    fn drawn_labels(host: &RecordingHost<usize>) -> Vec<&str> {
        host.hints.iter().map(|(_, label, _)| label.as_str()).collect()
    }

    fn active(tree: &FakeTree) -> (Navigator<&FakeTree>, RecordingHost<usize>) {
        let mut navigator = Navigator::new(config("asd"));
        let mut host = RecordingHost::new(0..100);
        navigator.activate(Some(tree), &mut host).unwrap();
        (navigator, host)
    }

    #[test]
    fn test_activation_labels_visible_tree() {
        let tree = tree();
        let (navigator, host) = active(&tree);
        assert!(navigator.is_active());
        assert_eq!(navigator.focus(), Some(tree.root()));
        assert_eq!(drawn_starts(&tree, &host), vec![5, 63, 35, 16, 23]);
        assert_eq!(drawn_labels(&host), vec!["aa", "as", "ad", "sa", "ss"]);
        assert_eq!(navigator.labels(), drawn_labels(&host));
        assert_eq!(host.installed, Some(2));
    }

    #[test]
    fn test_hints_are_cleared_before_drawing() {
        let tree = tree();
        let (_, host) = active(&tree);
        assert_eq!(host.events.first(), Some(&HostEvent::Cleared));
        assert_eq!(host.events.last(), Some(&HostEvent::Installed(Some(2))));
        let drawn = host
            .events
            .iter()
            .filter(|event| matches!(event, HostEvent::Drawn { .. }))
            .count();
        assert_eq!(drawn, 5);
    }

    #[test]
    fn test_full_label_jumps_and_refocuses_on_parent() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);

        assert_eq!(
            navigator.handle_key('s', &mut host).unwrap(),
            KeyOutcome::Pending { level: 1 }
        );
        assert_eq!(host.installed, Some(1));
        assert_eq!(
            navigator.handle_key('a', &mut host).unwrap(),
            KeyOutcome::Jumped { offset: 16 }
        );
        assert_eq!(host.cursor, 16);
        assert_eq!(navigator.focus(), Some(STMT));
        assert_eq!(drawn_starts(&tree, &host), vec![16, 23]);
        assert_eq!(drawn_labels(&host), vec!["a", "s"]);
        assert_eq!(host.installed, Some(1));
    }

    #[test]
    fn test_unknown_key_resets_input() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);
        navigator.handle_key('d', &mut host).unwrap();
        assert_eq!(host.installed, Some(1));
        assert_eq!(
            navigator.handle_key('x', &mut host).unwrap(),
            KeyOutcome::Ignored
        );
        assert_eq!(host.installed, Some(2));
        assert_eq!(
            navigator.handle_key('a', &mut host).unwrap(),
            KeyOutcome::Pending { level: 1 }
        );
        assert_eq!(
            navigator.handle_key('a', &mut host).unwrap(),
            KeyOutcome::Jumped { offset: 5 }
        );
    }

    #[test]
    fn test_label_past_registry_is_noop() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);
        navigator.handle_key('s', &mut host).unwrap();
        assert_eq!(
            navigator.handle_key('d', &mut host).unwrap(),
            KeyOutcome::Ignored
        );
        assert!(navigator.is_active());
        assert_eq!(host.cursor, 0);
        assert_eq!(host.installed, Some(2));
        assert_eq!(drawn_starts(&tree, &host), vec![5, 63, 35, 16, 23]);
    }

    #[test]
    fn test_ascend_from_top_level_item_reaches_root_and_stays() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);
        navigator.handle_key('a', &mut host).unwrap();
        navigator.handle_key('a', &mut host).unwrap();
        assert_eq!(navigator.focus(), Some(ITEM));

        assert_eq!(
            navigator.handle_key('u', &mut host).unwrap(),
            KeyOutcome::Ascended
        );
        assert_eq!(navigator.focus(), Some(tree.root()));
        navigator.handle_key('u', &mut host).unwrap();
        assert_eq!(navigator.focus(), Some(tree.root()));
        assert_eq!(drawn_starts(&tree, &host), vec![5, 63, 35, 16, 23]);
    }

    #[test]
    fn test_ascend_from_nested_focus_stops_below_root() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);
        navigator.handle_key('s', &mut host).unwrap();
        navigator.handle_key('a', &mut host).unwrap();
        assert_eq!(navigator.focus(), Some(STMT));

        navigator.ascend(&mut host).unwrap();
        assert_eq!(navigator.focus(), Some(ITEM));
        assert_eq!(drawn_starts(&tree, &host), vec![5, 35, 16, 23]);
    }

    #[test]
    fn test_scroll_while_active_resets_focus_to_root() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);
        navigator.handle_key('s', &mut host).unwrap();
        navigator.handle_key('a', &mut host).unwrap();

        assert_eq!(
            navigator.handle_key('n', &mut host).unwrap(),
            KeyOutcome::ScrollRequested(ScrollDirection::Down)
        );
        host.viewport = 55..100;
        navigator.viewport_changed(&mut host).unwrap();
        assert_eq!(navigator.focus(), Some(tree.root()));
        assert_eq!(drawn_starts(&tree, &host), vec![63]);
        assert_eq!(drawn_labels(&host), vec!["a"]);
    }

    #[test]
    fn test_scroll_while_inactive_does_nothing() {
        let mut navigator: Navigator<&FakeTree> = Navigator::new(config("asd"));
        let mut host = RecordingHost::new(0..100);
        navigator.viewport_changed(&mut host).unwrap();
        assert!(host.events.is_empty());
        assert!(host.hints.is_empty());
        assert!(!navigator.is_active());
    }

    #[test]
    fn test_suspend_clears_hints_and_restores_input() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);
        assert_eq!(
            navigator.handle_key('q', &mut host).unwrap(),
            KeyOutcome::Suspended
        );
        assert!(!navigator.is_active());
        assert!(host.hints.is_empty());
        assert_eq!(host.installed, None);
        let tail = &host.events[host.events.len() - 2..];
        assert_eq!(tail, &[HostEvent::Cleared, HostEvent::Installed(None)]);
        assert_eq!(
            navigator.handle_key('a', &mut host).unwrap(),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn test_missing_parser_refuses_activation() {
        let mut navigator: Navigator<&FakeTree> = Navigator::new(config("asd"));
        let mut host = RecordingHost::new(0..100);
        let err = navigator.activate(None, &mut host).unwrap_err();
        assert!(matches!(err, HintError::NoParserAvailable));
        assert!(!navigator.is_active());
        assert!(host.events.is_empty());
    }

    #[test]
    fn test_reserved_alphabet_refuses_activation() {
        let tree = tree();
        let mut navigator = Navigator::new(config("qu"));
        let mut host = RecordingHost::new(0..100);
        let err = navigator.activate(Some(&tree), &mut host).unwrap_err();
        assert!(matches!(err, HintError::NoUsableAlphabet));
        assert!(!navigator.is_active());
        assert!(host.hints.is_empty());
    }

    #[test]
    fn test_color_settings_apply_on_next_recompute() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);
        let before: Vec<Hsl> = host.hints.iter().map(|(_, _, color)| *color).collect();

        let mut tuned = navigator.config().clone();
        tuned.colors.seed = "another seed".to_string();
        navigator.set_config(tuned);
        assert_eq!(
            host.hints.iter().map(|(_, _, color)| *color).collect::<Vec<_>>(),
            before
        );

        navigator.viewport_changed(&mut host).unwrap();
        let after: Vec<Hsl> = host.hints.iter().map(|(_, _, color)| *color).collect();
        assert_eq!(after.len(), before.len());
        assert_ne!(after, before);
    }

    fn flat_tree(leaves: usize) -> FakeTree {
        let mut tree = FakeTree::new(0, 1000);
        let list = tree.add(0, "list", None, 0, 900);
        for leaf in 0..leaves {
            let start = 10 + leaf * 10;
            tree.add(list, "ident", Some("item"), start, start + 5);
        }
        tree
    }

    #[test]
    fn test_hint_rows_and_limits_apply_on_next_recompute() {
        let tree = flat_tree(20);
        let mut navigator = Navigator::new(config("asd"));
        let mut host = RecordingHost::new(0..1000);
        navigator.activate(Some(&tree), &mut host).unwrap();
        assert_eq!(host.hints.len(), 20);
        assert_eq!(drawn_labels(&host)[17], "sdd");

        let mut tuned = config("jkl;");
        tuned.hints.max_hints = 5;
        navigator.set_config(tuned);
        navigator.viewport_changed(&mut host).unwrap();
        assert_eq!(drawn_labels(&host), vec!["jj", "jk", "jl", "j;", "kj"]);
        assert_eq!(host.installed, Some(2));

        // Keys of the old alphabet no longer match.
        assert_eq!(
            navigator.handle_key('s', &mut host).unwrap(),
            KeyOutcome::Ignored
        );
        assert_eq!(
            navigator.handle_key('k', &mut host).unwrap(),
            KeyOutcome::Pending { level: 1 }
        );
        assert_eq!(
            navigator.handle_key('j', &mut host).unwrap(),
            KeyOutcome::Jumped { offset: 50 }
        );
        assert_eq!(host.cursor, 50);

        let mut shallow = navigator.config().clone();
        shallow.hints.depth_limit = 1;
        navigator.set_config(shallow);
        navigator.viewport_changed(&mut host).unwrap();
        assert!(host.hints.is_empty());
        assert!(navigator.is_active());
    }

    #[test]
    fn test_refocus_searches_below_given_node() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);
        navigator.refocus(STMT, &mut host).unwrap();
        assert_eq!(navigator.focus(), Some(STMT));
        assert_eq!(drawn_starts(&tree, &host), vec![16, 23]);
        assert_eq!(drawn_labels(&host), vec!["a", "s"]);
        assert_eq!(host.installed, Some(1));

        let mut idle: Navigator<&FakeTree> = Navigator::new(config("asd"));
        let mut idle_host = RecordingHost::new(0..100);
        idle.refocus(STMT, &mut idle_host).unwrap();
        assert!(!idle.is_active());
        assert!(idle_host.events.is_empty());
    }

    #[test]
    fn test_index_keeps_its_color_across_refocus() {
        let tree = tree();
        let (mut navigator, mut host) = active(&tree);
        let first = host.hints[0].2;
        navigator.handle_key('s', &mut host).unwrap();
        navigator.handle_key('a', &mut host).unwrap();
        assert_eq!(host.hints[0].2, first);
    }
}

//! Depth-first traversal of the element tree.
//!
//! Every level of the tree may walk a different sequence of child slots
//! (its layout), so the walk keeps one [`Cursor`] per ancestor level rather
//! than a single flattened order.

use smallvec::SmallVec;

use crate::arena::{ElementId, ListId};
use crate::document::Document;

/// Which part of the document a traversal covers, relative to its start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The start's own subtree, in pre-order.
    Containing,
    /// Everything after the start in document order, minus its subtree.
    Succeeding,
    /// Everything before the start, in reverse document order. Ancestors
    /// are visited after all of their earlier descendants.
    Preceding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Fresh,
    Positioned(ElementId),
    Revisiting(ElementId),
    Exhausted,
}

type Predicate<'a> = Box<dyn Fn(&Document, ElementId) -> bool + 'a>;

fn visit_all(_: &Document, _: ElementId) -> bool {
    true
}

/// Position inside one parent: which non-empty child slot and which child.
#[derive(Clone, Debug)]
struct Cursor {
    lists: SmallVec<[ListId; 2]>,
    slot: usize,
    child: usize,
}

impl Cursor {
    fn slots(doc: &Document, parent: ElementId) -> SmallVec<[ListId; 2]> {
        let Some(node) = doc.element(parent) else {
            return SmallVec::new();
        };
        node.get_final_layout()
            .into_iter()
            .filter_map(|slot| node.get_element_list(slot))
            .filter(|&list| doc.list(list).is_some_and(|l| !l.is_empty()))
            .collect()
    }

    fn first(doc: &Document, parent: ElementId) -> Option<Self> {
        let lists = Self::slots(doc, parent);
        if lists.is_empty() {
            return None;
        }
        Some(Self {
            lists,
            slot: 0,
            child: 0,
        })
    }

    fn last(doc: &Document, parent: ElementId) -> Option<Self> {
        let lists = Self::slots(doc, parent);
        let slot = lists.len().checked_sub(1)?;
        let child = doc.lists[lists[slot].index()].len() - 1;
        Some(Self { lists, slot, child })
    }

    fn current(&self, doc: &Document) -> ElementId {
        doc.lists[self.lists[self.slot].index()].elements[self.child]
    }

    fn step_forward(&mut self, doc: &Document) -> bool {
        if self.child + 1 < doc.lists[self.lists[self.slot].index()].len() {
            self.child += 1;
            true
        } else if self.slot + 1 < self.lists.len() {
            self.slot += 1;
            self.child = 0;
            true
        } else {
            false
        }
    }

    fn step_backward(&mut self, doc: &Document) -> bool {
        if self.child > 0 {
            self.child -= 1;
            true
        } else if self.slot > 0 {
            self.slot -= 1;
            self.child = doc.lists[self.lists[self.slot].index()].len() - 1;
            true
        } else {
            false
        }
    }
}

/// Cursors from the topmost ancestor of `start` down to `start` itself,
/// plus that topmost ancestor. `None` when some level does not walk the
/// list holding the next element down.
fn ancestry(doc: &Document, start: ElementId) -> Option<(ElementId, Vec<Cursor>)> {
    let mut frames = Vec::new();
    let mut current = start;
    while let Some(location) = doc.element(current)?.location() {
        let owner = doc.list(location.list)?.enclosing()?.owner;
        let lists = Cursor::slots(doc, owner);
        let slot = lists.iter().position(|&l| l == location.list)?;
        frames.push(Cursor {
            lists,
            slot,
            child: location.index,
        });
        current = owner;
    }
    frames.reverse();
    Some((current, frames))
}

/// Lazy depth-first walk yielding the elements that pass a predicate.
///
/// Built with [`Document::iter_elements`]. The yield predicate only filters
/// what is surfaced; every node in range is still visited. The break
/// predicate is tested first on each visited node and ends the walk.
pub struct ElementIterable<'a> {
    doc: &'a Document,
    start: ElementId,
    direction: Direction,
    include_start: bool,
    yield_if: Predicate<'a>,
    break_if: Option<Predicate<'a>>,
    state: State,
    base: ElementId,
    stack: Vec<Cursor>,
}

impl<'a> ElementIterable<'a> {
    pub(crate) fn new(doc: &'a Document, start: ElementId, direction: Direction) -> Self {
        Self {
            doc,
            start,
            direction,
            include_start: false,
            yield_if: Box::new(visit_all),
            break_if: None,
            state: State::Fresh,
            base: start,
            stack: Vec::new(),
        }
    }

    pub fn yield_if(mut self, predicate: impl Fn(&Document, ElementId) -> bool + 'a) -> Self {
        self.yield_if = Box::new(predicate);
        self
    }

    pub fn break_if(mut self, predicate: impl Fn(&Document, ElementId) -> bool + 'a) -> Self {
        self.break_if = Some(Box::new(predicate));
        self
    }

    /// Visits the start element itself before anything else.
    pub fn include_start(mut self, include: bool) -> Self {
        self.include_start = include;
        self
    }

    /// Element the walk currently sits on, `None` before the first step and
    /// once exhausted.
    pub fn current_element(&self) -> Option<ElementId> {
        match self.state {
            State::Positioned(e) | State::Revisiting(e) => Some(e),
            State::Fresh | State::Exhausted => None,
        }
    }

    /// True while the walk sits on an ancestor it climbed back to.
    pub fn is_revisiting(&self) -> bool {
        matches!(self.state, State::Revisiting(_))
    }

    fn current(&self) -> ElementId {
        self.stack
            .last()
            .map_or(self.base, |cursor| cursor.current(self.doc))
    }

    fn advance(&mut self, descend: bool) -> Option<State> {
        if descend {
            if let Some(cursor) = Cursor::first(self.doc, self.current()) {
                self.stack.push(cursor);
                return Some(State::Positioned(self.current()));
            }
        }
        loop {
            let top = self.stack.last_mut()?;
            if top.step_forward(self.doc) {
                return Some(State::Positioned(self.current()));
            }
            self.stack.pop();
        }
    }

    fn retreat(&mut self) -> Option<State> {
        let top = self.stack.last_mut()?;
        if top.step_backward(self.doc) {
            while let Some(cursor) = Cursor::last(self.doc, self.current()) {
                self.stack.push(cursor);
            }
            return Some(State::Positioned(self.current()));
        }
        self.stack.pop();
        Some(State::Revisiting(self.current()))
    }

    fn begin(&mut self) -> Option<State> {
        if self.direction != Direction::Containing {
            let (base, stack) = ancestry(self.doc, self.start)?;
            self.base = base;
            self.stack = stack;
        }
        if self.include_start {
            return Some(State::Positioned(self.start));
        }
        match self.direction {
            Direction::Containing => self.advance(true),
            Direction::Succeeding => self.advance(false),
            Direction::Preceding => self.retreat(),
        }
    }

    fn step(&mut self) -> Option<ElementId> {
        let next = match self.state {
            State::Exhausted => return None,
            State::Fresh => self.begin(),
            State::Positioned(e) | State::Revisiting(e) => match self.direction {
                Direction::Containing => self.advance(true),
                Direction::Succeeding => self.advance(e != self.start),
                Direction::Preceding => self.retreat(),
            },
        };
        self.state = next.unwrap_or(State::Exhausted);
        self.current_element()
    }
}

impl Iterator for ElementIterable<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        loop {
            let visited = self.step()?;
            if self
                .break_if
                .as_ref()
                .is_some_and(|stop| stop(self.doc, visited))
            {
                self.state = State::Exhausted;
                self.stack.clear();
                return None;
            }
            if (self.yield_if)(self.doc, visited) {
                return Some(visited);
            }
        }
    }
}

impl Document {
    /// Starts a traversal from `start` in `direction`.
    pub fn iter_elements(&self, start: ElementId, direction: Direction) -> ElementIterable<'_> {
        ElementIterable::new(self, start, direction)
    }

    /// Terminal elements of `element`'s subtree, in document order.
    pub fn terminal_elements(&self, element: ElementId) -> Vec<ElementId> {
        self.iter_elements(element, Direction::Containing)
            .include_start(true)
            .yield_if(|doc, id| doc.element(id).is_some_and(|e| e.is_terminal()))
            .collect()
    }
}

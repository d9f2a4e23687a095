#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Selection tracking over object collections.
//!
//! A cursor pins "the currently selected object" as a collection plus an
//! index and keeps that selection sensible across restructuring: when the
//! collection reports a membership change, the cursor revalidates its index
//! and moves to the change hint or the nearest surviving object instead of
//! pointing at a hole. An observer sits on top of a cursor and collapses
//! "the selection moved" and "the selected object mutated" into one change
//! signal for widgets that only care that their display is stale.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use starlance_core::object::MapObject;
use starlance_core::signal::{Signal, Subscription};
use starlance_core::Index;
use starlance_world::object_type::ObjectType;
use starlance_world::Universe;

/// A tracked selection: one index into one object collection.
///
/// Setting the index performs no validation; an index pointing at a hole
/// simply resolves to no object until the next membership change rehomes
/// it. The index-changed signal fires whenever the selection moves, whether
/// by explicit call or by reconciliation.
pub trait ObjectCursor {
    /// Currently selected index; the sentinel when nothing is selected.
    fn current_index(&self) -> Index;

    /// Moves the selection, firing index-changed only on an actual change.
    fn set_current_index(&self, index: Index);

    /// Collection the selection points into, if one is attached.
    fn object_type(&self) -> Option<Rc<dyn ObjectType>>;

    /// Signal fired after every selection movement.
    fn index_changed(&self) -> &Signal<()>;

    /// Object currently under the selection, if the index resolves.
    fn current_object(&self) -> Option<Rc<dyn MapObject>> {
        self.object_type()?.object_by_index(self.current_index())
    }

    /// Universe of the attached collection, when it has one.
    fn current_universe(&self) -> Option<Rc<Universe>> {
        self.object_type()?.universe()
    }
}

struct CursorState {
    object_type: Option<Rc<dyn ObjectType>>,
    index: Index,
    _binding: Option<Subscription>,
}

/// Standard cursor implementation with automatic reconciliation.
pub struct SimpleObjectCursor {
    weak_self: Weak<SimpleObjectCursor>,
    state: RefCell<CursorState>,
    index_changed: Signal<()>,
}

impl SimpleObjectCursor {
    /// Creates a detached cursor pointing at nothing.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            weak_self: weak.clone(),
            state: RefCell::new(CursorState {
                object_type: None,
                index: Index::NONE,
                _binding: None,
            }),
            index_changed: Signal::new(),
        })
    }

    /// Attaches the cursor to a collection (or detaches it with `None`).
    ///
    /// Attaching to the collection already attached is a no-op. Otherwise
    /// the cursor subscribes to the new collection's set-changed signal,
    /// revalidates its index against the new membership, and fires
    /// index-changed exactly once.
    pub fn set_object_type(&self, object_type: Option<Rc<dyn ObjectType>>) {
        {
            let state = self.state.borrow();
            match (&state.object_type, &object_type) {
                (Some(current), Some(new)) if Rc::ptr_eq(current, new) => return,
                (None, None) => return,
                _ => {}
            }
        }
        let binding = object_type.as_ref().map(|object_type| {
            let weak = self.weak_self.clone();
            object_type.set_changed().subscribe(move |hint| {
                if let Some(cursor) = weak.upgrade() {
                    cursor.reconcile(*hint);
                }
            })
        });
        {
            let mut state = self.state.borrow_mut();
            state._binding = binding;
            state.object_type = object_type;
            state.index = match &state.object_type {
                Some(object_type) => {
                    Self::reconcile_index(object_type.as_ref(), state.index, Index::NONE)
                }
                None => Index::NONE,
            };
        }
        self.index_changed.raise(&());
    }

    /// Revalidates the selection after a membership change.
    ///
    /// The current index is kept while it still resolves; a resolving hint
    /// is preferred over scanning; otherwise the selection moves to the
    /// next present object, wrapping once. Fires index-changed only when
    /// the selection actually moves.
    fn reconcile(&self, hint: Index) {
        {
            let mut state = self.state.borrow_mut();
            let Some(object_type) = state.object_type.clone() else {
                return;
            };
            let reconciled = Self::reconcile_index(object_type.as_ref(), state.index, hint);
            if reconciled == state.index {
                return;
            }
            state.index = reconciled;
        }
        self.index_changed.raise(&());
    }

    fn reconcile_index(object_type: &dyn ObjectType, current: Index, hint: Index) -> Index {
        if object_type.object_by_index(current).is_some() {
            return current;
        }
        if !hint.is_none() && object_type.object_by_index(hint).is_some() {
            return hint;
        }
        object_type.find_next_index_wrap(current, false)
    }
}

impl ObjectCursor for SimpleObjectCursor {
    fn current_index(&self) -> Index {
        self.state.borrow().index
    }

    // A detached cursor has nothing to select; its index is always the
    // sentinel, so movement requests are ignored until a collection is
    // attached.
    fn set_current_index(&self, index: Index) {
        {
            let mut state = self.state.borrow_mut();
            if state.object_type.is_none() || state.index == index {
                return;
            }
            state.index = index;
        }
        self.index_changed.raise(&());
    }

    fn object_type(&self) -> Option<Rc<dyn ObjectType>> {
        self.state.borrow().object_type.clone()
    }

    fn index_changed(&self) -> &Signal<()> {
        &self.index_changed
    }
}

impl fmt::Debug for SimpleObjectCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleObjectCursor")
            .field("index", &self.current_index())
            .field("attached", &self.object_type().is_some())
            .finish()
    }
}

fn attach_object(
    cursor: &Rc<dyn ObjectCursor>,
    binding: &Rc<RefCell<Option<Subscription>>>,
    changed: &Signal<()>,
) {
    let subscription = cursor.current_object().map(|object| {
        let changed = changed.clone();
        object.changed().subscribe(move |()| changed.raise(&()))
    });
    *binding.borrow_mut() = subscription;
}

/// Unified change feed for the object under a cursor.
///
/// Raises its signal when the cursor moves and when the selected object
/// reports a mutation, re-binding to the newly selected object on each
/// movement so at most one object subscription is live at a time.
pub struct ObjectObserver {
    cursor: Rc<dyn ObjectCursor>,
    changed: Signal<()>,
    _object_binding: Rc<RefCell<Option<Subscription>>>,
    _cursor_binding: Subscription,
}

impl ObjectObserver {
    /// Creates an observer bound to the cursor's current selection.
    ///
    /// Construction binds silently; the signal first fires on the next
    /// movement or mutation.
    #[must_use]
    pub fn new(cursor: Rc<dyn ObjectCursor>) -> Self {
        let changed = Signal::new();
        let object_binding = Rc::new(RefCell::new(None));
        attach_object(&cursor, &object_binding, &changed);

        let cursor_binding = cursor.index_changed().subscribe({
            let weak = Rc::downgrade(&cursor);
            let binding = Rc::clone(&object_binding);
            let changed = changed.clone();
            move |()| {
                if let Some(cursor) = weak.upgrade() {
                    attach_object(&cursor, &binding, &changed);
                    changed.raise(&());
                }
            }
        });

        Self {
            cursor,
            changed,
            _object_binding: object_binding,
            _cursor_binding: cursor_binding,
        }
    }

    /// Cursor this observer follows.
    #[must_use]
    pub fn cursor(&self) -> &Rc<dyn ObjectCursor> {
        &self.cursor
    }

    /// Signal fired on selection movement and selected-object mutation.
    #[must_use]
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }

    /// Object currently under the followed cursor.
    #[must_use]
    pub fn current_object(&self) -> Option<Rc<dyn MapObject>> {
        self.cursor.current_object()
    }
}

impl fmt::Debug for ObjectObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectObserver")
            .field("cursor", &self.cursor.current_index())
            .finish()
    }
}

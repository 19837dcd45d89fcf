use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use fieldkit_shared::string_ext::StringExt;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use self::events::Listeners;
use crate::{
    id::{self, FieldId, Id},
    pop::{Pop, PopRegistry},
    scheduler::{DefaultTimeProvider, Scheduler, TimeProvider},
    surface::{EditCommand, EditResult, EditingSurface, InputBuffer},
    transform::{Mode, Pipeline, TransformError},
};

mod capabilities;
mod events;
mod options;
mod state;

pub use capabilities::{Editable, Render, Transformable};
pub use events::{FieldEvent, FieldEventKind, Listener, ListenerId, Modifiers, Propagation};
pub use options::{ChangeCallback, DEFAULT_DEBOUNCE, FieldOptions, InputType, PopDirection};
pub use state::FieldState;

pub const ERROR_CLEAR_DELAY: Duration = Duration::from_millis(600);
/// Time the surface gets to finish a paste before the value is read back.
pub const PASTE_SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug)]
enum FieldJob {
    Notify(String),
    ClearError,
    SettlePaste { caret: usize },
}

struct AttachedPop {
    pop: Box<dyn Pop>,
    visible: Rc<Cell<bool>>,
}

/// Text input with a transform pipeline, a grapheme cluster limit and
/// debounced change notifications.
///
/// The field never blocks or spawns anything. The owning event loop feeds it
/// events through [`Field::handle_event`], sleeps until [`Field::next_deadline`]
/// and then calls [`Field::run_pending`].
#[derive(derive_more::Debug)]
pub struct Field<S = InputBuffer, P = DefaultTimeProvider>
where
    S: EditingSurface,
    P: TimeProvider,
{
    id: FieldId,
    title: String,
    name: Option<String>,
    input_type: InputType,
    pop_direction: PopDirection,
    surface: S,
    pipeline: Pipeline,
    limit: Option<usize>,
    debounce: Duration,
    /// Value last written back by the keystroke handler.
    committed: String,
    state: FieldState,
    message: Option<String>,
    shortcut_held: bool,
    removed: bool,
    #[debug(skip)]
    on_change: Option<ChangeCallback>,
    listeners: Listeners,
    #[debug(skip)]
    pop: Option<AttachedPop>,
    registry: PopRegistry,
    scheduler: Scheduler<FieldJob, P>,
    notify_job: Id,
    error_job: Id,
    paste_job: Id,
}

impl Field {
    /// Creates a field backed by an [`InputBuffer`].
    pub fn new(options: FieldOptions, registry: &PopRegistry) -> Result<Self, TransformError> {
        let surface = InputBuffer::new(None).masked(options.input_type.is_masked());
        Self::with_surface(options, surface, registry, DefaultTimeProvider)
    }
}

impl<S, P> Field<S, P>
where
    S: EditingSurface,
    P: TimeProvider,
{
    pub fn with_surface(
        options: FieldOptions,
        mut surface: S,
        registry: &PopRegistry,
        time_provider: P,
    ) -> Result<Self, TransformError> {
        let mut pipeline = Pipeline::new();
        pipeline.append(options.transforms)?;
        if let Some(custom) = options.custom_transform {
            pipeline.append(custom)?;
        }

        if let Some(value) = options.value {
            surface.set_value(value);
        }
        surface.set_placeholder(options.placeholder);
        surface.blur();

        let committed = surface.value().to_owned();
        let mut state = FieldState::empty();
        state.set(FieldState::HAS_VALUE, !committed.is_empty());

        let id = FieldId::new();
        log::debug!(
            id:% = id,
            title = options.title.as_str(),
            transforms:? = pipeline.names().collect::<Vec<_>>();
            "Created field"
        );

        Ok(Self {
            id,
            title: options.title,
            name: options.name,
            input_type: options.input_type,
            pop_direction: options.pop_direction,
            surface,
            pipeline,
            limit: options.limit.filter(|limit| *limit > 0),
            debounce: options.debounce,
            committed,
            state,
            message: None,
            shortcut_held: false,
            removed: false,
            on_change: options.on_change,
            listeners: Listeners::default(),
            pop: None,
            registry: registry.clone(),
            scheduler: Scheduler::new_with_provider(time_provider),
            notify_job: id::new(),
            error_job: id::new(),
            paste_job: id::new(),
        })
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn pop_direction(&self) -> PopDirection {
        self.pop_direction
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn state(&self) -> FieldState {
        let mut state = self.state;
        state.set(FieldState::POP_ACTIVE, self.is_pop_active());
        state
    }

    /// Message of the last error, shown while [`FieldState::MESSAGE`] is set.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|_| self.state.contains(FieldState::MESSAGE))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn handle_event(&mut self, event: &FieldEvent) -> Propagation {
        if self.removed {
            return Propagation::Continue;
        }

        log::trace!(id:% = self.id, event:? = event; "Handling field event");
        let propagation = match event {
            FieldEvent::KeyDown(modifiers) => {
                self.shortcut_held = modifiers.is_shortcut();
                Propagation::Continue
            }
            FieldEvent::KeyUp => {
                if !self.shortcut_held {
                    self.reconcile();
                }
                Propagation::Continue
            }
            FieldEvent::Paste(text) => {
                if !self.surface.is_disabled() {
                    self.paste(text);
                }
                Propagation::Stop
            }
            FieldEvent::Focus => {
                self.surface.focus();
                self.state.remove(FieldState::MESSAGE);
                self.show_pop();
                Propagation::Continue
            }
            FieldEvent::Blur => {
                self.shortcut_held = false;
                self.surface.blur();
                self.commit_on_blur();
                Propagation::Continue
            }
            FieldEvent::Click => Propagation::Stop,
        };
        self.listeners.dispatch(event);

        propagation
    }

    /// Subscribes `listener` to events of the given kind.
    pub fn on(
        &mut self,
        kind: FieldEventKind,
        listener: impl FnMut(&FieldEvent) + 'static,
    ) -> ListenerId {
        self.listeners.add(kind, Box::new(listener))
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Runs the final transforms and the limit on `value` and commits the
    /// result if it differs from the current value, notifying the change
    /// callback.
    pub fn commit_value(&mut self, value: &str) {
        if let Some(value) = self.prepare_value(value) {
            self.write_committed(value.clone());
            self.update(&value);
        }
    }

    /// Like [`Field::commit_value`] but only refreshes the has-value state
    /// instead of notifying.
    pub fn set_value_quiet(&mut self, value: &str) {
        if let Some(value) = self.prepare_value(value) {
            self.write_committed(value);
            self.state.set(FieldState::HAS_VALUE, !self.committed.is_empty());
        }
    }

    /// Shows an error state that clears itself after [`ERROR_CLEAR_DELAY`].
    /// A message stays visible until the field is focused again.
    pub fn error(&mut self, message: Option<&str>) {
        if self.removed {
            return;
        }

        if let Some(message) = message {
            self.state.insert(FieldState::MESSAGE);
            self.message = Some(message.to_owned());
        }
        self.state.insert(FieldState::ERROR);
        self.scheduler.schedule_replace(self.error_job, ERROR_CLEAR_DELAY, FieldJob::ClearError);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.removed { None } else { self.scheduler.next_deadline() }
    }

    /// Runs every timer that is due. Returns the number of timers run.
    pub fn run_pending(&mut self) -> usize {
        if self.removed {
            return 0;
        }

        // One at a time, a job may reschedule or cancel the ones after it.
        let mut count = 0;
        while let Some(job) = self.scheduler.pop_due() {
            count += 1;
            match job {
                FieldJob::Notify(value) => self.update(&value),
                FieldJob::ClearError => self.state.remove(FieldState::ERROR),
                FieldJob::SettlePaste { caret } => self.settle_paste(caret),
            }
            if self.removed {
                break;
            }
        }

        count
    }

    /// Cancels all timers, drops listeners and the pop. The field ignores
    /// everything afterwards.
    pub fn remove(&mut self) {
        if self.removed {
            return;
        }

        self.scheduler.clear();
        self.listeners.clear();
        self.detach_pop();
        self.on_change = None;
        self.state.remove(FieldState::MESSAGE | FieldState::HAS_VALUE);
        self.removed = true;
        log::debug!(id:% = self.id; "Removed field");
    }

    pub fn attach_pop(&mut self, pop: impl Pop + 'static) {
        self.detach_pop();
        self.pop = Some(AttachedPop { pop: Box::new(pop), visible: Rc::new(Cell::new(false)) });
    }

    pub fn detach_pop(&mut self) -> Option<Box<dyn Pop>> {
        self.hide_pop();
        self.pop.take().map(|attached| attached.pop)
    }

    pub fn pop(&self) -> Option<&dyn Pop> {
        self.pop.as_ref().map(|attached| attached.pop.as_ref())
    }

    pub fn is_pop_active(&self) -> bool {
        self.pop.as_ref().is_some_and(|attached| attached.visible.get())
    }

    pub fn show_pop(&mut self) {
        if let Some(attached) = &self.pop
            && !attached.visible.get()
        {
            self.registry.open(self.id, &attached.visible);
        }
    }

    pub fn hide_pop(&mut self) {
        if let Some(attached) = &self.pop
            && attached.visible.get()
        {
            self.registry.close(self.id);
            attached.visible.set(false);
        }
    }

    pub fn toggle_pop(&mut self) {
        if self.is_pop_active() {
            self.hide_pop();
        } else {
            self.show_pop();
        }
    }

    pub fn pop_select_next(&mut self) {
        if let Some(attached) = self.pop.as_mut() {
            attached.pop.select_next();
            self.sync_from_pop();
        }
    }

    pub fn pop_select_prev(&mut self) {
        if let Some(attached) = self.pop.as_mut() {
            attached.pop.select_prev();
            self.sync_from_pop();
        }
    }

    /// Copies the pop text into the input.
    pub fn sync_from_pop(&mut self) {
        if self.removed {
            return;
        }
        let Some(text) = self.pop.as_ref().map(|attached| attached.pop.text()) else {
            return;
        };

        self.surface.set_value(text);
        self.state.set(FieldState::HAS_VALUE, !self.surface.value().is_empty());
        self.reconcile();
    }

    fn sync_to_pop(&mut self, value: &str) {
        let Some(attached) = self.pop.as_mut() else {
            return;
        };
        if attached.pop.text() == value {
            return;
        }

        if let Err(err) = attached.pop.set_text(value) {
            log::debug!(id:% = self.id, error:% = err; "Pop rejected value");
            self.error(Some(&err.to_string()));
        }
    }

    fn limited(&self, mut value: String) -> String {
        if let Some(limit) = self.limit
            && value.truncate_clusters(limit)
        {
            log::trace!(id:% = self.id, limit; "Value truncated to limit");
        }
        value
    }

    /// Final transforms plus limit. `None` if the result equals the current
    /// value.
    fn prepare_value(&self, value: &str) -> Option<String> {
        if self.removed {
            return None;
        }
        let value = self.limited(self.pipeline.apply(value, Mode::Final));
        (value != self.surface.value()).then_some(value)
    }

    fn write_committed(&mut self, value: String) {
        self.committed.clone_from(&value);
        self.surface.set_value(value);
    }

    /// Keystroke handler: live transforms, limit, write back with the caret
    /// kept in place and a debounced notification. A live result equal to the
    /// committed value is not written back, so the raw text stays on screen.
    fn reconcile(&mut self) {
        let caret = self.surface.caret();
        let mut value = self.pipeline.apply(self.surface.value(), Mode::Live);
        let truncated = self.limit.is_some_and(|limit| value.truncate_clusters(limit));

        if !truncated && value == self.committed {
            return;
        }

        self.write_committed(value.clone());
        self.surface.set_caret(caret);
        self.scheduler.schedule_replace(self.notify_job, self.debounce, FieldJob::Notify(value));
    }

    fn paste(&mut self, text: &str) {
        let caret = self.surface.caret();
        self.surface.insert_text(text);
        self.scheduler.schedule_replace(
            self.paste_job,
            PASTE_SETTLE_DELAY,
            FieldJob::SettlePaste { caret: caret + text.len() },
        );
    }

    fn settle_paste(&mut self, caret: usize) {
        let value = self.limited(self.pipeline.apply(self.surface.value(), Mode::Final));
        self.write_committed(value.clone());
        self.surface.set_caret(caret);
        self.scheduler.cancel(self.notify_job);
        self.update(&value);
    }

    fn commit_on_blur(&mut self) {
        let caret = self.surface.caret();
        let value = self.pipeline.apply(self.surface.value(), Mode::Final);
        if value != self.surface.value() {
            self.surface.set_value(value);
            self.surface.set_caret(caret);
        }

        self.state.set(FieldState::HAS_VALUE, !self.surface.value().is_empty());
        self.reconcile();
    }

    /// Commits `value`: clears the error state, syncs the pop and notifies.
    fn update(&mut self, value: &str) {
        self.state.remove(FieldState::ERROR);
        self.scheduler.cancel(self.error_job);
        self.sync_to_pop(value);

        let Some(on_change) = self.on_change.as_mut() else {
            return;
        };
        if let Err(err) = on_change(value) {
            log::warn!(id:% = self.id, error:? = err; "Change callback failed");
            self.error(Some(&err.to_string()));
        }
    }
}

impl<S, P> Editable for Field<S, P>
where
    S: EditingSurface,
    P: TimeProvider,
{
    fn value(&self) -> &str {
        self.surface.value()
    }

    fn set_value(&mut self, value: &str) {
        if self.removed {
            return;
        }
        self.write_committed(value.to_owned());
    }

    fn caret(&self) -> usize {
        self.surface.caret()
    }

    fn set_caret(&mut self, pos: usize) {
        self.surface.set_caret(pos);
    }

    fn reset_caret(&mut self, to_begin: bool) {
        let pos = if to_begin { 0 } else { self.surface.value().len() };
        self.surface.set_caret(pos);
    }

    fn focus(&mut self) {
        self.handle_event(&FieldEvent::Focus);
        self.reset_caret(false);
    }

    fn blur(&mut self) {
        self.handle_event(&FieldEvent::Blur);
    }

    fn set_active(&mut self, active: bool) {
        self.surface.set_disabled(!active);
    }
}

impl<S, P> Transformable for Field<S, P>
where
    S: EditingSurface,
    P: TimeProvider,
{
    fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }
}

impl<P: TimeProvider> Field<InputBuffer, P> {
    /// Applies an editing command as a single keystroke.
    pub fn edit(&mut self, modifiers: Modifiers, command: EditCommand) -> EditResult {
        if self.removed {
            return EditResult::NoChange;
        }

        self.handle_event(&FieldEvent::KeyDown(modifiers));
        let result = self.surface.handle_command(command);
        self.handle_event(&FieldEvent::KeyUp);

        result
    }
}

impl<P: TimeProvider> Render for Field<InputBuffer, P> {
    fn render(&mut self, width: usize) -> Vec<Line<'static>> {
        let state = self.state();
        let title_style = if state.contains(FieldState::ERROR) {
            Style::default().red().bold()
        } else {
            Style::default().bold()
        };
        let input_style =
            if self.surface.is_disabled() { Style::default().dim() } else { Style::default() };

        let mut lines = vec![
            Line::from(Span::styled(self.title.clone(), title_style)),
            Line::from(self.surface.as_spans(width, input_style)),
        ];
        if let Some(message) = self.message() {
            let message_style = Style::default().red().italic();
            lines.push(Line::from(Span::styled(message.to_owned(), message_style)));
        }
        if state.contains(FieldState::POP_ACTIVE)
            && let Some(attached) = &self.pop
        {
            match self.pop_direction {
                PopDirection::Down => lines.extend(attached.pop.lines()),
                PopDirection::Up => {
                    lines.splice(0..0, attached.pop.lines());
                }
            }
        }

        lines
    }
}

impl<S, P> Drop for Field<S, P>
where
    S: EditingSurface,
    P: TimeProvider,
{
    fn drop(&mut self) {
        self.remove();
    }
}

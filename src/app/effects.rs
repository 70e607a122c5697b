use crate::app::{App, Message, Model, ToastLevel};

impl App {
    /// Run the I/O that follows a message: save committed changes and keep
    /// presence in step with the note.
    ///
    /// `revision_before` is the buffer revision before `update` ran.
    pub(super) fn handle_message_side_effects(
        &mut self,
        model: &mut Model,
        msg: &Message,
        revision_before: u64,
    ) {
        let changed = model.buffer.revision() != revision_before;
        match msg {
            Message::ClearNote if !model.clear_pending => {
                self.persist(model);
                self.presence.end();
            }
            Message::Save => {
                if self.persist(model) {
                    model.show_toast(
                        ToastLevel::Info,
                        format!("Saved {}", model.note_path.display()),
                    );
                }
            }
            Message::Quit => {
                if changed || model.buffer.is_dirty() {
                    self.persist(model);
                }
                let content = model.buffer.text();
                if !content.is_empty() {
                    self.presence.auto_manage(&content, &model.title);
                }
            }
            _ if changed => {
                self.persist(model);
                self.presence.auto_manage(&model.buffer.text(), &model.title);
            }
            _ => {}
        }
        model.presence_active = self.presence.is_running();
    }

    /// Write the buffer to storage. Failures become a toast.
    fn persist(&self, model: &mut Model) -> bool {
        let _scope = crate::perf::scope("app.save");
        match self.storage.save(&model.buffer.text()) {
            Ok(()) => {
                model.buffer.mark_clean();
                crate::perf::log_event(
                    "note.save",
                    format!(
                        "path={} revision={}",
                        model.note_path.display(),
                        model.buffer.revision()
                    ),
                );
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save note");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                false
            }
        }
    }
}

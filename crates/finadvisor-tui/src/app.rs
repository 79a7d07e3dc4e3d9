use finadvisor_core::{fallback_response, Advisor, Conversation};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,

    // Conversation state
    pub conversation: Conversation,
    pub advisor: Advisor,
    // Single in-flight slot: one pending reply at most, guarded by the
    // conversation's busy flag.
    pub reply_task: Option<JoinHandle<String>>,

    // Input state
    pub input_cursor: usize, // cursor position in the draft, in chars

    // Chat scroll state
    pub chat_scroll: u16,
    pub chat_height: u16, // Height of chat area for scroll calculations
    pub chat_width: u16,  // Width of chat area for wrap calculations
    pub total_chat_lines: u16,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation
}

impl App {
    pub fn new(advisor: Advisor) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Landing,
            input_mode: InputMode::Normal,

            conversation: Conversation::new(),
            advisor,
            reply_task: None,

            input_cursor: 0,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            total_chat_lines: 0,

            animation_frame: 0,
        }
    }

    pub fn open_chat(&mut self) {
        self.screen = Screen::Chat;
        self.input_mode = InputMode::Editing;
        self.input_cursor = self.conversation.draft_char_count();
        self.scroll_chat_to_bottom();
    }

    pub fn back_to_landing(&mut self) {
        self.screen = Screen::Landing;
        self.input_mode = InputMode::Normal;
    }

    /// Submit the draft. A blank draft or a pending reply makes this a
    /// silent no-op; otherwise the user message is appended and the reply
    /// task is scheduled.
    pub fn submit_message(&mut self) {
        if self.reply_task.is_some() {
            return;
        }
        if let Some(text) = self.conversation.submit() {
            self.input_cursor = 0;
            self.scroll_chat_to_bottom();

            let advisor = self.advisor.clone();
            self.reply_task = Some(tokio::spawn(
                async move { advisor.respond(&text).await },
            ));
        }
    }

    /// Collect a finished reply, if any. Called on every run-loop wakeup;
    /// the tick timer guarantees one at least every 300ms.
    pub async fn poll_reply(&mut self) {
        if self.reply_task.as_ref().is_some_and(|task| task.is_finished()) {
            if let Some(task) = self.reply_task.take() {
                // A join error means the reply task panicked; answer with
                // the fallback so the cycle still completes.
                let response = task
                    .await
                    .unwrap_or_else(|_| fallback_response().to_string());
                self.conversation.complete(response);
                self.scroll_chat_to_bottom();
            }
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.conversation.is_busy() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Chat scrolling
    pub fn scroll_down(&mut self) {
        if self.chat_scroll < self.total_chat_lines.saturating_sub(self.chat_height) {
            self.chat_scroll = self.chat_scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    /// Scroll the transcript so the latest message (or the typing
    /// indicator) is visible. Re-run on every append.
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in self.conversation.messages() {
            total_lines += 1; // Role line
            // Calculate wrapped lines for each line of content
            for line in msg.content.lines() {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1; // Empty line still takes one line
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.conversation.is_busy() {
            total_lines += 2; // Role line + "Typing..."
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.chat_scroll = total_lines.saturating_sub(visible_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finadvisor_core::{select_response, Sender};
    use std::time::Duration;

    fn test_app() -> App {
        App::new(Advisor::new(Duration::from_millis(1500)))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.conversation.insert_char(app.input_cursor, c);
            app.input_cursor += 1;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn submission_cycle_appends_exactly_two_messages() {
        let mut app = test_app();
        let before = app.conversation.messages().len();

        type_text(&mut app, "What about my 401k investments and tax deductions?");
        app.submit_message();
        tokio::task::yield_now().await; // let the reply task park on its timer

        assert!(app.conversation.is_busy());
        assert_eq!(app.conversation.messages().len(), before + 1);
        assert_eq!(app.conversation.messages().last().unwrap().sender, Sender::User);
        assert_eq!(app.input_cursor, 0);

        // Just short of the delay the reply is still pending.
        tokio::time::advance(Duration::from_millis(1499)).await;
        app.poll_reply().await;
        assert!(app.conversation.is_busy());
        assert_eq!(app.conversation.messages().len(), before + 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        app.poll_reply().await;

        assert!(!app.conversation.is_busy());
        assert!(app.reply_task.is_none());
        assert_eq!(app.conversation.messages().len(), before + 2);
        let reply = app.conversation.messages().last().unwrap();
        assert_eq!(reply.sender, Sender::Assistant);
        // "tax" outranks "invest" in the trigger table.
        assert_eq!(
            reply.content,
            select_response("What about my 401k investments and tax deductions?")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn submissions_are_rejected_while_a_reply_is_pending() {
        let mut app = test_app();
        let before = app.conversation.messages().len();

        type_text(&mut app, "tax");
        app.submit_message();
        tokio::task::yield_now().await;

        type_text(&mut app, "loan");
        app.submit_message();
        assert_eq!(app.conversation.messages().len(), before + 1);

        // After the cycle completes the held draft can be sent.
        tokio::time::advance(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        app.poll_reply().await;
        assert_eq!(app.conversation.messages().len(), before + 2);

        app.submit_message();
        assert_eq!(app.conversation.messages().len(), before + 3);
        assert!(app.conversation.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_submission_schedules_nothing() {
        let mut app = test_app();
        let before = app.conversation.messages().len();

        app.submit_message();
        type_text(&mut app, "   ");
        app.submit_message();

        assert!(app.reply_task.is_none());
        assert!(!app.conversation.is_busy());
        assert_eq!(app.conversation.messages().len(), before);
    }

    #[test]
    fn bottom_scroll_accounts_for_wrapped_lines() {
        let mut app = test_app();
        app.chat_width = 10;
        app.chat_height = 5;

        // Greeting alone wraps far past five rows at width 10.
        app.scroll_chat_to_bottom();
        assert!(app.chat_scroll > 0);

        // A taller viewport needs less scrolling.
        let narrow_scroll = app.chat_scroll;
        app.chat_height = 40;
        app.scroll_chat_to_bottom();
        assert!(app.chat_scroll <= narrow_scroll);
    }
}

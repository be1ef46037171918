//! Client execution: wires the layers together and runs the input loop.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::ClientConfig,
    domain::{ChatApi, ChatSession, ChatSurface, FrameSender, ViewUpdate},
    error::ClientError,
    infrastructure::{FilePreferenceStore, HttpChatApi, WebSocketConnection},
    usecase::{
        DispatchFrameUseCase, ListRoomsUseCase, NavigateRoomUseCase, NotifyTypingUseCase,
        SearchUsersUseCase, SendMessageUseCase, SendReactionUseCase, ToggleThemeUseCase,
    },
};

use super::{
    command::{Command, EditKind, classify_edit},
    formatter::MessageFormatter,
    input::{InputEvent, spawn_input_thread},
    terminal::TerminalSurface,
};

const PROMPT: &str = "> ";

/// Whether the input loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Routes input events to the use cases
pub struct Controller {
    surface: Arc<dyn ChatSurface>,
    send_message: SendMessageUseCase,
    send_reaction: SendReactionUseCase,
    notify_typing: NotifyTypingUseCase,
    search_users: SearchUsersUseCase,
    navigate: NavigateRoomUseCase,
    list_rooms: ListRoomsUseCase,
    theme: ToggleThemeUseCase,
}

impl Controller {
    pub fn new(
        session: Arc<Mutex<ChatSession>>,
        api: Arc<dyn ChatApi>,
        sender: Arc<dyn FrameSender>,
        surface: Arc<dyn ChatSurface>,
        theme: ToggleThemeUseCase,
    ) -> Self {
        Self {
            send_message: SendMessageUseCase::new(session.clone(), sender.clone()),
            send_reaction: SendReactionUseCase::new(sender.clone()),
            notify_typing: NotifyTypingUseCase::new(session.clone(), sender.clone()),
            search_users: SearchUsersUseCase::new(api.clone(), session.clone(), surface.clone()),
            navigate: NavigateRoomUseCase::new(api.clone(), session, sender, surface.clone()),
            list_rooms: ListRoomsUseCase::new(api, surface.clone()),
            theme,
            surface,
        }
    }

    pub fn navigate(&self) -> &NavigateRoomUseCase {
        &self.navigate
    }

    /// Handle a live edit of the input line.
    pub async fn on_edit(&self, line: &str) {
        match classify_edit(line) {
            EditKind::Message => self.notify_typing.keystroke(),
            EditKind::Search(query) => self.search_users.on_input(query).await,
            EditKind::Command => {}
        }
    }

    /// Handle a submitted line.
    pub async fn on_submit(&self, line: &str) -> Flow {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                self.notice(e.to_string());
                return Flow::Continue;
            }
        };

        match command {
            Command::Say(text) => {
                if !self.send_message.execute(&text).await {
                    self.notice("Join a room first (/join <roomId>, /new <name> or /dm <n>)");
                }
            }
            Command::Search(query) => self.search_users.on_input(&query).await,
            Command::Dm(position) => match self.navigate.pick_search_result(position).await {
                Ok(Some(_)) => {}
                Ok(None) => self.notice(format!("No search result #{}", position)),
                Err(e) => self.report("Opening the DM failed", e),
            },
            Command::NewRoom(name) => {
                if let Err(e) = self.navigate.create_group(&name).await {
                    self.report("Creating the room failed", e);
                }
            }
            Command::Join(room_id) => {
                if let Err(e) = self.navigate.join(room_id).await {
                    self.report("Joining the room failed", e);
                }
            }
            Command::Rooms => {
                if let Err(e) = self.list_rooms.execute().await {
                    self.report("Listing rooms failed", e);
                }
            }
            Command::React { message_id, emoji } => {
                if !self.send_reaction.execute(message_id, emoji.as_deref()).await {
                    self.notice("Not connected; reaction dropped");
                }
            }
            Command::Theme => {
                self.theme.toggle();
            }
            Command::Help => self.notice(MessageFormatter::format_help()),
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    fn notice(&self, text: impl Into<String>) {
        self.surface.render(&ViewUpdate::Notice(text.into()));
    }

    fn report(&self, what: &str, error: ClientError) {
        tracing::warn!("{}: {}", what, error);
        self.notice(format!("{}: {}", what, error));
    }
}

/// Run the terminal client until the user quits or reconnecting gives up.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let session = Arc::new(Mutex::new(ChatSession::new(config.room_id, config.user_id)));
    let surface: Arc<dyn ChatSurface> = Arc::new(TerminalSurface::new(PROMPT));
    let api: Arc<dyn ChatApi> = Arc::new(HttpChatApi::new(
        config.server_url.clone(),
        config.token.as_deref(),
    )?);

    let connection = WebSocketConnection::new(
        config.websocket_url(),
        config.token.clone(),
        config.reconnect,
    );
    let sender: Arc<dyn FrameSender> = Arc::new(connection.sender());

    let theme = ToggleThemeUseCase::new(
        Arc::new(FilePreferenceStore::new(&config.preferences_path)),
        surface.clone(),
    );
    theme.load();

    let controller = Controller::new(session.clone(), api, sender, surface.clone(), theme);
    let dispatch = Arc::new(DispatchFrameUseCase::new(session.clone(), surface.clone()));

    surface.render(&ViewUpdate::Title(session.lock().await.title()));
    surface.render(&ViewUpdate::Notice("Type /help for commands".to_string()));
    if let Some(room_id) = config.room_id {
        surface.render(&ViewUpdate::RoomEntered(room_id));
        controller.navigate().load_history().await;
    }

    let mut input = spawn_input_thread(PROMPT.to_string());
    let mut connection_task = tokio::spawn(async move { connection.run(dispatch).await });

    loop {
        tokio::select! {
            result = &mut connection_task => {
                return match result {
                    Ok(result) => result,
                    Err(e) => Err(ClientError::Connection(e.to_string())),
                };
            }
            event = input.recv() => {
                let Some(event) = event else {
                    break;
                };
                match event {
                    InputEvent::Edited(line) => controller.on_edit(&line).await,
                    InputEvent::Submitted(line) => {
                        if controller.on_submit(&line).await == Flow::Quit {
                            break;
                        }
                    }
                }
            }
        }
    }

    tracing::info!("Client session ended");
    connection_task.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{PreferenceStore, RoomId, UserId, port::MockChatApi},
        usecase::testing::{RecordingSender, RecordingSurface},
    };
    use serde_json::json;

    struct NullStore;

    impl PreferenceStore for NullStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), ClientError> {
            Ok(())
        }
    }

    fn controller(
        api: MockChatApi,
        room: Option<i64>,
    ) -> (Controller, Arc<RecordingSender>, Arc<RecordingSurface>) {
        let session = Arc::new(Mutex::new(ChatSession::new(
            room.map(RoomId::new),
            Some(UserId::new(1)),
        )));
        let sender = Arc::new(RecordingSender::connected());
        let surface = Arc::new(RecordingSurface::default());
        let theme = ToggleThemeUseCase::new(Arc::new(NullStore), surface.clone());
        let controller = Controller::new(
            session,
            Arc::new(api),
            sender.clone(),
            surface.clone(),
            theme,
        );
        (controller, sender, surface)
    }

    #[tokio::test]
    async fn test_plain_line_is_sent_as_message() {
        // テスト項目: 通常の入力行はメッセージとして送信される
        // given (前提条件):
        let (controller, sender, _surface) = controller(MockChatApi::new(), Some(7));

        // when (操作):
        let flow = controller.on_submit("hello").await;

        // then (期待する結果):
        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            sender.frames()[0],
            json!({"type": "MESSAGE", "roomId": 7, "content": "hello"})
        );
    }

    #[tokio::test]
    async fn test_failed_navigation_is_reported_as_notice() {
        // テスト項目: ルーム参加の失敗は通知行として表示され、終了しない
        // given (前提条件):
        let mut api = MockChatApi::new();
        api.expect_join_room()
            .returning(|_| Err(ClientError::Unauthorized));
        let (controller, _sender, surface) = controller(api, Some(7));

        // when (操作):
        let flow = controller.on_submit("/join 9").await;

        // then (期待する結果):
        assert_eq!(flow, Flow::Continue);
        assert!(matches!(
            surface.updates().last(),
            Some(ViewUpdate::Notice(text)) if text.starts_with("Joining the room failed")
        ));
    }

    #[tokio::test]
    async fn test_theme_command_toggles_theme() {
        // テスト項目: /theme コマンドでテーマが切り替わる
        // given (前提条件):
        let (controller, _sender, surface) = controller(MockChatApi::new(), None);

        // when (操作):
        controller.on_submit("/theme").await;

        // then (期待する結果):
        assert_eq!(
            surface.updates(),
            vec![ViewUpdate::Theme(crate::domain::Theme::Light)]
        );
    }

    #[tokio::test]
    async fn test_quit_ends_the_loop() {
        // テスト項目: /quit で入力ループが終了する
        // given (前提条件):
        let (controller, _sender, _surface) = controller(MockChatApi::new(), None);

        // when (操作):
        let flow = controller.on_submit("/quit").await;

        // then (期待する結果):
        assert_eq!(flow, Flow::Quit);
    }

    #[tokio::test]
    async fn test_unknown_command_shows_hint() {
        // テスト項目: 未知のコマンドは通知行でヘルプを案内する
        // given (前提条件):
        let (controller, sender, surface) = controller(MockChatApi::new(), Some(7));

        // when (操作):
        controller.on_submit("/shrug").await;

        // then (期待する結果):
        assert!(sender.frames().is_empty());
        assert!(matches!(
            surface.updates().last(),
            Some(ViewUpdate::Notice(text)) if text.contains("/help")
        ));
    }
}

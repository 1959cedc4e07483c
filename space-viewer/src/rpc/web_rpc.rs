use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::{
    AssetsReady, EnterRejection, EnterSceneRequest, LoadState, ViewState, can_enter,
};
use crate::engine::loading::progress::LoadingProgress;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. A missing `id` makes it a notification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Side effect a request asks the app to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcAction {
    None,
    EnterScene,
}

/// Snapshot of the app state a request is answered from.
pub struct RpcContext<'a> {
    pub load: LoadState,
    pub view: ViewState,
    pub progress: &'a LoadingProgress,
}

/// Resource queueing messages for the page until the end of the frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the page ↔ viewer messaging layer.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_loading_progress,
                    notify_assets_ready,
                    send_outgoing_messages,
                )
                    .chain(),
            )
            .add_systems(OnEnter(ViewState::SceneActive), notify_scene_active);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available; RPC disabled"),
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    load_state: Res<State<LoadState>>,
    view_state: Res<State<ViewState>>,
    progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut enter_events: EventWriter<EnterSceneRequest>,
) {
    let context = RpcContext {
        load: *load_state.get(),
        view: *view_state.get(),
        progress: &*progress,
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let (response, action) = handle_rpc_request(&request, &context);
                if action == RpcAction::EnterScene {
                    enter_events.write(EnterSceneRequest);
                }
                if let Some(response) = response {
                    rpc_interface.queue_response(response);
                }
            }
            // Includes our own responses echoed back when not embedded.
            Err(parse_error) => debug!("Ignoring non-request message: {}", parse_error),
        }
    }
}

/// Handle one request. Requests with an `id` get a response; notifications
/// are acted on silently.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
) -> (Option<RpcResponse>, RpcAction) {
    let (result, action) = match request.method.as_str() {
        "enter_scene" => handle_enter_scene(&request.params, context),
        "get_load_state" => (handle_get_load_state(&request.params, context), RpcAction::None),
        _ => {
            if request.id.is_none() {
                debug!("Ignoring notification '{}'", request.method);
                return (None, RpcAction::None);
            }
            warn!("Unknown RPC method: {}", request.method);
            (
                Err(RpcError::method_not_found(&request.method)),
                RpcAction::None,
            )
        }
    };

    let Some(id) = request.id.clone() else {
        if let Err(error) = result {
            warn!("RPC notification '{}' failed: {}", request.method, error.message);
        }
        return (None, action);
    };

    let response = match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    };
    (Some(response), action)
}

fn handle_enter_scene(
    params: &serde_json::Value,
    context: &RpcContext,
) -> (Result<serde_json::Value, RpcError>, RpcAction) {
    if let Err(error) = expect_no_params(params, "enter_scene") {
        return (Err(error), RpcAction::None);
    }

    match can_enter(context.load, context.view) {
        Ok(()) => {
            info!("Scene entry requested over RPC");
            (
                Ok(serde_json::json!({ "success": true })),
                RpcAction::EnterScene,
            )
        }
        Err(EnterRejection::StillLoading) => (
            Err(RpcError::still_loading(context.progress)),
            RpcAction::None,
        ),
        Err(EnterRejection::AlreadyActive) => (
            Ok(serde_json::json!({ "success": true, "already_active": true })),
            RpcAction::None,
        ),
    }
}

fn handle_get_load_state(
    params: &serde_json::Value,
    context: &RpcContext,
) -> Result<serde_json::Value, RpcError> {
    expect_no_params(params, "get_load_state")?;

    Ok(serde_json::json!({
        "state": match context.load {
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
        },
        "view": match context.view {
            ViewState::Landing => "landing",
            ViewState::SceneActive => "scene_active",
        },
        "loaded": context.progress.loaded,
        "expected": context.progress.expected,
    }))
}

fn expect_no_params(params: &serde_json::Value, method: &str) -> Result<(), RpcError> {
    match params {
        serde_json::Value::Null => Ok(()),
        serde_json::Value::Object(map) if map.is_empty() => Ok(()),
        serde_json::Value::Array(items) if items.is_empty() => Ok(()),
        _ => Err(RpcError::invalid_params(&format!(
            "'{method}' takes no parameters"
        ))),
    }
}

/// Progress payload for the page. Failure counts are left out.
pub fn progress_payload(progress: &LoadingProgress) -> serde_json::Value {
    serde_json::json!({
        "loaded": progress.loaded,
        "expected": progress.expected,
        "percent": progress.percent(),
    })
}

fn notify_loading_progress(
    progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if progress.is_changed() {
        rpc_interface.send_notification("loading_progress", progress_payload(&progress));
    }
}

fn notify_assets_ready(
    mut ready_events: EventReader<AssetsReady>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for ready in ready_events.read() {
        rpc_interface.send_notification(
            "assets_ready",
            serde_json::json!({ "model_count": ready.model_count }),
        );
    }
}

fn notify_scene_active(mut rpc_interface: ResMut<WebRpcInterface>) {
    rpc_interface.send_notification("scene_active", serde_json::json!({}));
}

/// Send queued notifications and responses to the page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window (the window itself when not embedded).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    /// Server-defined error for entry attempts before readiness.
    pub fn still_loading(progress: &LoadingProgress) -> Self {
        Self {
            code: -32002,
            message: "Assets are still loading".to_string(),
            data: Some(progress_payload(progress)),
        }
    }
}

use crate::browser;
use anyhow::Result;
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use web_sys::KeyboardEvent;

const KEYDOWN: &str = "keydown";
const KEYUP: &str = "keyup";

/// Keyboard event reduced to what the scene needs, the `KeyboardEvent.code`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPress {
    KeyDown(String),
    KeyUp(String),
}

/// Listens to window keyboard events
/// - browser callbacks only push into the channel
/// - the game drains it at the start of each update
pub fn prepare_input() -> Result<UnboundedReceiver<KeyPress>> {
    let (keydown_sender, keyevent_receiver) = unbounded();
    let keyup_sender = keydown_sender.clone();

    browser::listen(KEYDOWN, forward(keydown_sender, KeyPress::KeyDown))?;
    browser::listen(KEYUP, forward(keyup_sender, KeyPress::KeyUp))?;

    Ok(keyevent_receiver)
}

fn forward(
    sender: UnboundedSender<KeyPress>,
    press: fn(String) -> KeyPress,
) -> wasm_bindgen::closure::Closure<dyn FnMut(KeyboardEvent)> {
    browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        // receiver only goes away with the page
        let _ = sender.unbounded_send(press(event.code()));
    }) as Box<dyn FnMut(KeyboardEvent)>)
}

/// Everything queued since the last call, oldest first
pub fn drain(receiver: &mut UnboundedReceiver<KeyPress>) -> Vec<KeyPress> {
    let mut presses = Vec::new();
    // Err : nothing queued, or every sender is gone
    while let Ok(press) = receiver.try_recv() {
        presses.push(press);
    }
    presses
}

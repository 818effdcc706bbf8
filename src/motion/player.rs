//! Plays a [`Timeline`] on the browser's frame scheduler.
//!
//! Playback is fire-and-await: the caller gets a kill handle plus a
//! future that resolves when the timeline finishes. Step closures run
//! inside frame callbacks and should only touch the DOM; anything that
//! needs the component runtime (signal writes, navigation) belongs after
//! the await in the task that started the playback.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;

use super::raf::{self, RafLoop};
use super::timeline::{Playback, Timeline};

/// Kill switch for a playing timeline. Cloneable so the orchestrator can
/// keep one while the spawning task awaits completion.
#[derive(Clone)]
pub struct TimelineHandle {
    raf: RafLoop,
}

impl TimelineHandle {
    /// Stop playback where it stands; whatever the step closures last
    /// wrote to the DOM is left in place. The completion future resolves
    /// `false`.
    pub fn kill(&self) {
        self.raf.cancel();
    }
}

/// Start `timeline` and return a kill handle plus a completion future.
/// The future resolves `true` if the timeline ran to its end, `false` if
/// it was killed first.
pub fn play(mut timeline: Timeline) -> (TimelineHandle, impl Future<Output = bool>) {
    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let raf = raf::start(move |now| match timeline.tick(now) {
        Playback::Running => true,
        Playback::Done => {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(true);
            }
            false
        }
    });

    // A killed loop drops the frame closure and with it the sender; the
    // receiver then reads that as "did not finish".
    let done = async move { rx.await.unwrap_or(false) };
    (TimelineHandle { raf }, done)
}

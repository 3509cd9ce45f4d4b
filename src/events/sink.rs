use super::Event;

/// Receiver of editor events.
///
/// Implemented for closures `Fn(Event)` and, with the `events` feature, for
/// `crossbeam::channel::Sender<Event>`.
pub trait EventSink {
    fn send(&self, event: Event);
}

impl<F: Fn(Event)> EventSink for F {
    fn send(&self, event: Event) {
        (self)(event);
    }
}

#[cfg(feature = "events")]
impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        // a dropped receiver only means nobody listens anymore
        let _ = crossbeam::channel::Sender::send(self, event);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn closures_are_sinks() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let seen = Rc::clone(&seen);
            move |e: Event| seen.borrow_mut().push(e)
        };
        EventSink::send(&sink, Event::GraphCleared);
        assert_eq!(*seen.borrow(), vec![Event::GraphCleared]);
    }

    #[cfg(feature = "events")]
    #[test]
    fn crossbeam_sender_is_a_sink() {
        let (tx, rx) = crossbeam::channel::unbounded();
        EventSink::send(&tx, Event::FramesCleared);
        assert_eq!(rx.try_recv().ok(), Some(Event::FramesCleared));
    }
}

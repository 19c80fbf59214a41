/*!
    per-message silence tracking and bus failure detection

    an external fixed-period timer (typically 10 ms) drives [tick]; frame
    validation resets the matched message's counter. the failure predicate
    covers the whole set because the monitored messages feed one logical bus
    segment: a single live message type proves the segment is up.
*/

use crate::message::Message;


/**
    advance every silence counter by one period and return the bus state

    a message is silent once its counter reaches its configured threshold;
    the bus has failed when **every** monitored message is silent. the
    aggregate result is also stored into each message's `bus_failed` flag.

    an empty message set reports failure, the fail-safe default for an
    unconfigured monitor.
*/
pub fn tick(messages: &mut [Message<'_>]) -> bool {
    if messages.is_empty() {
        return true;
    }
    let mut silent = 0;
    for message in messages.iter_mut() {
        message.tick();
        if message.is_silent() {
            silent += 1;
        }
    }
    let failed = silent == messages.len();
    for message in messages.iter_mut() {
        message.set_bus_failed(failed);
    }
    failed
}

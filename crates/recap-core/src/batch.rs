//! Output batching: individual sends vs bounded albums.
//!
//! Albums are consecutive runs of groupable items, at most
//! [`ALBUM_MAX_ITEMS`] per group. Voice and animation items are never
//! grouped; they are emitted individually at their original position. A
//! run that would form a single-item album degrades to an individual send
//! because the platform rejects one-item groups.

use recap_shared::constants::{ALBUM_MAX_ITEMS, ALBUM_MIN_ITEMS};
use recap_shared::types::MediaItem;

/// A media item paired with its final caption.
#[derive(Debug, Clone)]
pub struct CaptionedItem {
    pub item: MediaItem,
    pub caption: String,
}

/// One delivery operation handed to the platform collaborator.
#[derive(Debug)]
pub enum DeliveryBatch {
    Single(CaptionedItem),
    Album(Vec<CaptionedItem>),
}

/// Partition transformed output into delivery operations, preserving
/// arrival order.
pub fn plan(outputs: Vec<CaptionedItem>, as_album: bool) -> Vec<DeliveryBatch> {
    if !as_album {
        return outputs.into_iter().map(DeliveryBatch::Single).collect();
    }

    let mut batches = Vec::new();
    let mut run: Vec<CaptionedItem> = Vec::new();

    for output in outputs {
        if output.item.kind.groupable() {
            run.push(output);
            if run.len() == ALBUM_MAX_ITEMS {
                flush(&mut batches, &mut run);
            }
        } else {
            flush(&mut batches, &mut run);
            batches.push(DeliveryBatch::Single(output));
        }
    }
    flush(&mut batches, &mut run);

    batches
}

fn flush(batches: &mut Vec<DeliveryBatch>, run: &mut Vec<CaptionedItem>) {
    if run.is_empty() {
        return;
    }
    if run.len() < ALBUM_MIN_ITEMS {
        for item in run.drain(..) {
            batches.push(DeliveryBatch::Single(item));
        }
    } else {
        batches.push(DeliveryBatch::Album(std::mem::take(run)));
    }
}

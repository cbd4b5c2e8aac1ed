use rand::seq::SliceRandom;
use rand::Rng;

use crate::piece::PieceKind;

/// The queue is refilled whenever it holds this many pieces or fewer, so
/// collaborators can always preview more than 14 upcoming pieces.
pub const QUEUE_PREVIEW: usize = 14;

/// Classic randomizer: every piece an independent uniform draw.
pub fn classic_next(queue: &mut Vec<PieceKind>) {
    let mut rng = rand::thread_rng();
    while queue.len() <= QUEUE_PREVIEW {
        queue.push(PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]);
    }
}

/// Modern bag randomizer: appends `bag_multiplier` shuffled copies of all
/// seven pieces in one batch. When `first_batch` and `no_overhang` are set,
/// the batch is reshuffled until it does not open with S, Z or O, since
/// those force an overhang as the very first piece.
pub fn modern_next(
    queue: &mut Vec<PieceKind>,
    bag_multiplier: u32,
    first_batch: bool,
    no_overhang: bool,
) {
    if queue.len() > QUEUE_PREVIEW {
        return;
    }

    let mut bag = Vec::with_capacity(bag_multiplier.max(1) as usize * PieceKind::ALL.len());
    for _ in 0..bag_multiplier.max(1) {
        bag.extend_from_slice(&PieceKind::ALL);
    }

    let mut rng = rand::thread_rng();
    bag.shuffle(&mut rng);

    if first_batch && no_overhang {
        while matches!(bag[0], PieceKind::S | PieceKind::Z | PieceKind::O) {
            bag.shuffle(&mut rng);
        }
    }

    queue.append(&mut bag);
}

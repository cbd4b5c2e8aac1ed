/// Named events the engine emits for the sound (and stats) collaborators.
/// The engine never plays audio itself; it appends these to an ordered
/// queue that a listener drains after each command or tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SoundEvent {
    Move,
    Rotate,
    HardDrop,
    Lock,
    LineClear(u32),
    TSpinMini,
    TSpinFull,
    Garbage,
    Pause,
    Unpause,
    LevelUp,
    Hold,
    GameStart,
    GameOver,
    GameFinished,
}

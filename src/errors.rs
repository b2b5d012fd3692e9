use std::fmt;

/// Main error type for the encounter engine.
///
/// None of these cross the battle/render boundary as panics: the session
/// loop turns every one of them into a re-prompt or a user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// User input outside the defined choice set; recovered by re-prompting
    Selection(SelectionError),
    /// An action whose requirements are not met; the round repeats without
    /// consuming a turn
    Precondition(PreconditionError),
    /// Reference data the ingestion layer should have provided is missing
    DataIntegrity(DataIntegrityError),
}

/// Errors for inputs outside the defined choice set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Move index past the end of the active creature's move list
    InvalidMoveIndex(usize),
    /// Roster index past the end of the roster
    InvalidRosterIndex(usize),
    /// Potion index past the end of the inventory list
    InvalidPotionIndex(usize),
}

/// Errors for actions whose requirements are not met
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// Fight chosen with no active creature selected
    NoCreatureChosen,
    /// The active creature has no moves to fight with
    NoMovesKnown,
    /// Pokeball action with a zero pokeball count
    OutOfPokeballs,
    /// Revive action with a zero revive count
    OutOfRevives,
    /// Revive aimed at a creature that has not fainted
    TargetNotFainted,
}

/// Errors for gaps in the supplied reference data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataIntegrityError {
    /// A creature is missing its "hp"/"maxHP" stat pair
    MissingHpStat(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Selection(err) => write!(f, "Selection error: {}", err),
            EngineError::Precondition(err) => write!(f, "Precondition unmet: {}", err),
            EngineError::DataIntegrity(err) => write!(f, "Data integrity gap: {}", err),
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::InvalidMoveIndex(index) => write!(f, "Invalid move index: {}", index),
            SelectionError::InvalidRosterIndex(index) => {
                write!(f, "Invalid roster index: {}", index)
            }
            SelectionError::InvalidPotionIndex(index) => {
                write!(f, "Invalid potion index: {}", index)
            }
        }
    }
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::NoCreatureChosen => write!(f, "You have not chosen a pokemon!"),
            PreconditionError::NoMovesKnown => write!(f, "This pokemon has no moves"),
            PreconditionError::OutOfPokeballs => write!(f, "You have no pokeballs left!"),
            PreconditionError::OutOfRevives => write!(f, "You have no revives left!"),
            PreconditionError::TargetNotFainted => write!(f, "That pokemon has not fainted"),
        }
    }
}

impl fmt::Display for DataIntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIntegrityError::MissingHpStat(identifier) => {
                write!(f, "Creature '{}' is missing its hp/maxHP stat pair", identifier)
            }
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for SelectionError {}
impl std::error::Error for PreconditionError {}
impl std::error::Error for DataIntegrityError {}

impl From<SelectionError> for EngineError {
    fn from(err: SelectionError) -> Self {
        EngineError::Selection(err)
    }
}

impl From<PreconditionError> for EngineError {
    fn from(err: PreconditionError) -> Self {
        EngineError::Precondition(err)
    }
}

impl From<DataIntegrityError> for EngineError {
    fn from(err: DataIntegrityError) -> Self {
        EngineError::DataIntegrity(err)
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

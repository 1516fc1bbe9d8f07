//! Assembly request types

/// Policy for the order in which a block's candidate tracks are considered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Take tracks in the source playlist's order
    Sequential,

    /// Sample tracks without replacement in uniformly random order
    Random,
}

/// Policy for ordering the blocks themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceMode {
    /// Keep the request order
    Identity,

    /// Explicit reordering: for each output position, the input block
    /// position (0-based) to play there. Must be a bijection over the
    /// request's index range.
    Manual(Vec<usize>),

    /// Uniformly random permutation of the blocks
    Shuffle,
}

/// One unit of the assembly request: fill `target_ms` of playback time with
/// tracks from a single source playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Id of the source playlist in the catalog
    pub playlist_id: String,

    /// Target duration in milliseconds. Zero is legal and selects nothing.
    pub target_ms: u64,

    /// How candidate tracks are ordered during selection
    pub mode: SelectionMode,
}

impl Block {
    /// Create a block with random selection (the common case)
    pub fn new(playlist_id: impl Into<String>, target_ms: u64) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            target_ms,
            mode: SelectionMode::Random,
        }
    }

    /// Switch the block to sequential selection
    pub fn sequential(mut self) -> Self {
        self.mode = SelectionMode::Sequential;
        self
    }
}

/// A complete assembly request: the ordered block list plus the knobs that
/// apply to the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyRequest {
    /// Blocks in request order
    pub blocks: Vec<Block>,

    /// How blocks are reordered before selection
    pub sequencing: SequenceMode,

    /// Whether a track id may appear at most once across the whole result.
    /// Applies globally to the request, not per block.
    pub dedup: bool,

    /// Seed for the run's random source; identical inputs and seed
    /// reproduce the identical result
    pub seed: u64,
}

impl AssemblyRequest {
    /// Create a request with identity ordering, dedup on, and seed 0
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            sequencing: SequenceMode::Identity,
            dedup: true,
            seed: 0,
        }
    }

    /// Set the block sequencing mode
    pub fn with_sequencing(mut self, sequencing: SequenceMode) -> Self {
        self.sequencing = sequencing;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Allow the same track to be picked by more than one block
    pub fn allow_repeats(mut self) -> Self {
        self.dedup = false;
        self
    }
}

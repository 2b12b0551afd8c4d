//! Bounded search node pool backing a query engine

/// Node index type
pub type NodeIndex = u16;

/// Null node index constant
pub const DT_NULL_IDX: NodeIndex = NodeIndex::MAX;

/// Largest pool a query engine may request
pub const MAX_POOL_NODES: usize = DT_NULL_IDX as usize;

/// Search node slot keyed by polygon id and state
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub poly: u32,
    pub state: u8,
    pub cost: f32,
    pub total: f32,
    pub parent: Option<NodeIndex>,
}

/// Node storage and hash buckets sized to a query engine's node budget
#[derive(Debug)]
pub struct NodePool {
    nodes: Vec<Node>,
    /// First node index for each hash bucket
    first: Vec<NodeIndex>,
    hash_size: usize,
}

impl NodePool {
    /// Allocates `max_nodes` nodes with a power of two hash table
    pub fn new(max_nodes: usize) -> Self {
        let max_nodes = max_nodes.min(MAX_POOL_NODES);
        let hash_size = (max_nodes / 4).max(1).next_power_of_two();

        Self {
            nodes: vec![Node::default(); max_nodes],
            first: vec![DT_NULL_IDX; hash_size],
            hash_size,
        }
    }

    /// Frees the storage
    pub fn release(&mut self) {
        self.nodes = Vec::new();
        self.first = Vec::new();
    }

    pub fn is_released(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Gets memory used by the pool
    pub fn mem_used(&self) -> usize {
        std::mem::size_of::<Self>()
            + std::mem::size_of::<Node>() * self.nodes.len()
            + std::mem::size_of::<NodeIndex>() * self.first.len()
    }

    /// Number of nodes currently allocated
    pub fn max_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn hash_size(&self) -> usize {
        self.hash_size
    }
}

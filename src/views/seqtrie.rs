/// A link from a trie node to one of its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub label: u8,
    /// How many inserted sequences pass through this link.
    pub count: usize,
    /// Sum of the weights of those sequences.
    pub weight: f64,
    pub child: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Node {
    links: Vec<Link>,
}

/// A prefix trie over byte sequences. Each link counts the sequences
/// that pass through it and accumulates their weights. Nodes live in
/// an arena; the root is node 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqTrie {
    nodes: Vec<Node>,
}

impl Default for SeqTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl SeqTrie {
    pub const ROOT: usize = 0;

    pub fn new() -> Self {
        SeqTrie {
            nodes: vec![Node::default()],
        }
    }

    fn find_link(&self, node: usize, label: u8) -> Option<usize> {
        self.nodes[node].links.iter().position(|l| l.label == label)
    }

    pub fn insert(&mut self, seq: &[u8], weight: f64) {
        let mut node = Self::ROOT;
        for &label in seq {
            let ix = match self.find_link(node, label) {
                Some(ix) => ix,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].links.push(Link {
                        label,
                        count: 0,
                        weight: 0.0,
                        child,
                    });
                    self.nodes[node].links.len() - 1
                }
            };
            let link = &mut self.nodes[node].links[ix];
            link.count += 1;
            link.weight += weight;
            node = link.child;
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[Self::ROOT].links.is_empty()
    }

    pub fn links(&self, node: usize) -> &[Link] {
        self.nodes.get(node).map(|n| n.links.as_slice()).unwrap_or(&[])
    }

    /// The links followed when reading `seq` from the root, stopping
    /// at the first base with no link.
    pub fn path(&self, seq: &[u8]) -> Vec<Link> {
        let mut node = Self::ROOT;
        let mut out = Vec::with_capacity(seq.len());
        for &label in seq {
            match self.find_link(node, label) {
                Some(ix) => {
                    let link = self.nodes[node].links[ix];
                    node = link.child;
                    out.push(link);
                }
                None => break,
            }
        }
        out
    }

    /// Number of inserted sequences starting with `prefix`.
    pub fn count_prefix(&self, prefix: &[u8]) -> usize {
        let path = self.path(prefix);
        if path.len() < prefix.len() {
            return 0;
        }
        path.last().map_or(0, |l| l.count)
    }
}

use hashbrown::HashMap;

/// Old connection id → replacement connection id.
///
/// Edges are collapsed on insert so nothing points at a retired id, and
/// lookups follow edges to a fixed point.
#[derive(Debug, Clone, Default)]
pub struct Redirects {
    edges: HashMap<i32, i32>,
}

impl Redirects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `old` has been retired in favour of `new`.
    /// Returns false when the edge would point at itself.
    pub fn link(&mut self, old: i32, new: i32) -> bool {
        if old == new {
            return false;
        }

        // The retired id no longer redirects anywhere else
        self.edges.remove(&old);

        // A reverse edge would close a two-cycle
        if self.edges.get(&new) == Some(&old) {
            self.edges.remove(&new);
        }

        for target in self.edges.values_mut() {
            if *target == old {
                *target = new;
            }
        }

        if self.reaches(new, old) {
            self.edges.remove(&new);
        }

        self.edges.insert(old, new);
        true
    }

    /// Drop the outgoing edge of `id`, returning its old target
    pub fn unlink(&mut self, id: i32) -> Option<i32> {
        self.edges.remove(&id)
    }

    /// Follow edges from `id` until no further edge exists
    pub fn resolve(&self, id: i32) -> i32 {
        let mut current = id;
        let mut hops = 0;
        while let Some(&next) = self.edges.get(&current) {
            if next == current || hops > self.edges.len() {
                break;
            }
            current = next;
            hops += 1;
        }
        current
    }

    pub fn get(&self, id: i32) -> Option<i32> {
        self.edges.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn reaches(&self, from: i32, to: i32) -> bool {
        let mut current = from;
        for _ in 0..=self.edges.len() {
            match self.edges.get(&current) {
                Some(&next) if next == to => return true,
                Some(&next) => current = next,
                None => return false,
            }
        }
        false
    }
}

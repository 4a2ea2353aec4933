use std::collections::HashMap;
use verdant_data::AgentId;

/// Symmetric "intends to mate with" relation.
///
/// Both directions are written together, so `partner_of(a) == Some(b)`
/// holds exactly when `partner_of(b) == Some(a)`. An agent is paired with
/// at most one partner.
#[derive(Debug, Clone, Default)]
pub struct MatePairs {
    partners: HashMap<AgentId, AgentId>,
}

impl MatePairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `a` with `b`, dissolving whatever pairing either side had.
    /// Proposing to oneself is ignored.
    pub fn propose(&mut self, a: AgentId, b: AgentId) {
        if a == b || self.is_paired_with(a, b) {
            return;
        }
        self.dissolve(a);
        self.dissolve(b);
        self.partners.insert(a, b);
        self.partners.insert(b, a);
    }

    pub fn partner_of(&self, id: AgentId) -> Option<AgentId> {
        self.partners.get(&id).copied()
    }

    pub fn is_paired_with(&self, a: AgentId, b: AgentId) -> bool {
        self.partners.get(&a) == Some(&b)
    }

    /// Removes `id` and its partner from the relation. Returns the old partner.
    pub fn dissolve(&mut self, id: AgentId) -> Option<AgentId> {
        let partner = self.partners.remove(&id)?;
        self.partners.remove(&partner);
        Some(partner)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.partners.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// Dissolves every pair with a side that fails `keep`.
    pub fn retain_alive<F>(&mut self, mut keep: F)
    where
        F: FnMut(AgentId) -> bool,
    {
        let doomed: Vec<AgentId> = self
            .partners
            .iter()
            .filter(|(id, partner)| !keep(**id) || !keep(**partner))
            .map(|(id, _)| *id)
            .collect();
        for id in doomed {
            self.partners.remove(&id);
        }
    }
}

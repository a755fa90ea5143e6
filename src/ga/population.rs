//! Fixed-size population of agents.

use crate::evaluation::Fitness;

use super::agent::Agent;

/// An ordered population with stable slots.
///
/// Slots are only ever overwritten by a strictly better agent, so the best
/// total in the population never increases.
#[derive(Debug, Clone, Default)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// Creates a population from agents.
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// Agents in slot order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Returns `true` if the population has no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// The agent with the lowest total (the first one on ties).
    pub fn best(&self) -> Option<&Agent> {
        self.agents.iter().reduce(|best, agent| {
            if agent.fitness().total() < best.fitness().total() {
                agent
            } else {
                best
            }
        })
    }

    /// Sum of every agent's distance and over-demand.
    pub fn aggregate_fitness(&self) -> Fitness {
        self.agents.iter().map(Agent::fitness).sum()
    }

    /// Puts `child` into `slot` if it is strictly better than the occupant.
    pub fn replace_if_better(&mut self, slot: usize, child: Agent) -> bool {
        match self.agents.get_mut(slot) {
            Some(current) if child.fitness().total() < current.fitness().total() => {
                *current = child;
                true
            }
            _ => false,
        }
    }
}

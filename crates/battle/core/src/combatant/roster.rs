use super::Combatant;

/// Ordered, exclusively owned group of combatants fighting on one side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    members: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, combatant: Combatant) -> Self {
        self.push(combatant);
        self
    }

    /// Append a combatant and return its index.
    pub fn push(&mut self, combatant: Combatant) -> usize {
        self.members.push(combatant);
        self.members.len() - 1
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Combatant> {
        self.members.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Combatant> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Combatant> {
        self.members.iter_mut()
    }

    /// Indices of living members, in roster order.
    pub fn alive_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.is_alive())
            .map(|(index, _)| index)
    }

    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|member| member.is_alive()).count()
    }

    /// True when no member is alive. An empty roster counts as defeated.
    pub fn all_defeated(&self) -> bool {
        self.members.iter().all(|member| !member.is_alive())
    }

    pub fn into_inner(self) -> Vec<Combatant> {
        self.members
    }
}

impl From<Vec<Combatant>> for Roster {
    fn from(members: Vec<Combatant>) -> Self {
        Self { members }
    }
}

impl FromIterator<Combatant> for Roster {
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Roster {
    type Item = Combatant;
    type IntoIter = std::vec::IntoIter<Combatant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Combatant;
    type IntoIter = std::slice::Iter<'a, Combatant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

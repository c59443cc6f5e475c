/// Ordered, independently addressable sequence of sub-records sized by
/// a user-chosen count. New elements start from a template so each one
/// is defaulted on its own.
#[derive(Debug, Clone)]
pub struct RepeatedGroup<T> {
    items: Vec<T>,
    template: T,
}

impl<T: Clone> RepeatedGroup<T> {
    /// A group of `count` elements, each a copy of `template`.
    pub fn new(template: T, count: usize) -> Self {
        Self {
            items: vec![template.clone(); count],
            template,
        }
    }

    /// Append a defaulted element and return it for editing.
    pub fn add(&mut self) -> &mut T {
        self.items.push(self.template.clone());
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Remove the element at `index`, shifting later ones down.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Grow with defaulted elements or truncate from the end.
    pub fn resize(&mut self, count: usize) {
        self.items.resize(count, self.template.clone());
    }

    /// The element new entries start from.
    pub fn template(&self) -> &T {
        &self.template
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_group_has_count_defaulted_elements() {
        let group = RepeatedGroup::new(String::from("default"), 3);
        assert_eq!(group.len(), 3);
        assert!(group.iter().all(|s| s == "default"));
    }

    #[test]
    fn elements_edit_independently() {
        let mut group = RepeatedGroup::new(0u32, 2);
        *group.get_mut(1).unwrap() = 7;
        assert_eq!(group.to_vec(), vec![0, 7]);
    }

    #[test]
    fn add_appends_from_template() {
        let mut group = RepeatedGroup::new(1u32, 1);
        *group.get_mut(0).unwrap() = 5;
        *group.add() += 1;
        assert_eq!(group.to_vec(), vec![5, 2]);
    }

    #[test]
    fn remove_shifts_and_reports_out_of_range() {
        let mut group = RepeatedGroup::new(0u32, 0);
        for n in 1..=3 {
            *group.add() = n;
        }
        assert_eq!(group.remove(1), Some(2));
        assert_eq!(group.to_vec(), vec![1, 3]);
        assert_eq!(group.remove(5), None);
    }

    #[test]
    fn resize_grows_with_defaults_and_truncates() {
        let mut group = RepeatedGroup::new(9u32, 1);
        *group.get_mut(0).unwrap() = 4;
        group.resize(3);
        assert_eq!(group.to_vec(), vec![4, 9, 9]);
        group.resize(0);
        assert!(group.is_empty());
    }
}

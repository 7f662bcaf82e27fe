use crate::types::PlaylistDraft;

pub struct DraftManager {
    drafts: Vec<PlaylistDraft>,
    next_id: u64,
}

impl DraftManager {
    pub fn new() -> Self {
        Self {
            drafts: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, name: String, description: String, public: bool) -> &PlaylistDraft {
        let id = self.next_id;
        self.next_id += 1;
        self.drafts.push(PlaylistDraft {
            id,
            name,
            description,
            public,
        });
        &self.drafts[self.drafts.len() - 1]
    }

    pub fn remove(&mut self, index: usize) -> Option<PlaylistDraft> {
        if index < self.drafts.len() {
            Some(self.drafts.remove(index))
        } else {
            None
        }
    }

    pub fn rename(&mut self, index: usize, name: String) -> bool {
        match self.drafts.get_mut(index) {
            Some(draft) => {
                draft.name = name;
                true
            }
            None => false,
        }
    }

    pub fn describe(&mut self, index: usize, description: String) -> bool {
        match self.drafts.get_mut(index) {
            Some(draft) => {
                draft.description = description;
                true
            }
            None => false,
        }
    }

    pub fn toggle_public(&mut self, index: usize) -> Option<bool> {
        self.drafts.get_mut(index).map(|draft| {
            draft.public = !draft.public;
            draft.public
        })
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistDraft> {
        self.drafts.get(index)
    }

    pub fn all(&self) -> &[PlaylistDraft] {
        &self.drafts
    }

    pub fn count(&self) -> usize {
        self.drafts.len()
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }
}

impl Default for DraftManager {
    fn default() -> Self {
        Self::new()
    }
}

//! Undirected conflict graph over opaque course identifiers.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::{Result, TimetableError};

/// An undirected graph of courses that must not share a slot.
///
/// Courses keep their insertion order, which is the deterministic
/// iteration order used for tie-breaking everywhere in the crate.
///
/// # Examples
///
/// ```
/// use u_timetable::graph::ConflictGraph;
///
/// let graph = ConflictGraph::from_conflicts(
///     ["math", "physics", "art"],
///     [("math", "physics"), ("physics", "art")],
/// ).unwrap();
///
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.conflict_pairs().len(), 2);
/// assert_eq!(graph.max_degree(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ConflictGraph<C> {
    courses: Vec<C>,
    index: HashMap<C, usize>,
    adjacency: Vec<Vec<usize>>,
    pairs: Vec<(usize, usize)>,
    pair_set: HashSet<(usize, usize)>,
}

impl<C> Default for ConflictGraph<C> {
    fn default() -> Self {
        Self {
            courses: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            pairs: Vec::new(),
            pair_set: HashSet::new(),
        }
    }
}

impl<C: Eq + Hash + Clone> ConflictGraph<C> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with the given courses and no conflicts.
    pub fn with_courses<I: IntoIterator<Item = C>>(courses: I) -> Self {
        let mut graph = Self::new();
        for course in courses {
            graph.add_course(course);
        }
        graph
    }

    /// Creates a graph from a course list and a list of conflicting pairs.
    ///
    /// Courses that appear only in `pairs` are appended after `courses`.
    pub fn from_conflicts<I, P>(courses: I, pairs: P) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        P: IntoIterator<Item = (C, C)>,
    {
        let mut graph = Self::with_courses(courses);
        for (a, b) in pairs {
            graph.add_conflict(a, b)?;
        }
        Ok(graph)
    }

    /// Adds a course and returns its index. Re-adding returns the existing index.
    pub fn add_course(&mut self, course: C) -> usize {
        if let Some(&idx) = self.index.get(&course) {
            return idx;
        }
        let idx = self.courses.len();
        self.index.insert(course.clone(), idx);
        self.courses.push(course);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Records a conflict between two courses, adding either if missing.
    ///
    /// Returns `false` if the pair was already present in either orientation.
    pub fn add_conflict(&mut self, a: C, b: C) -> Result<bool> {
        let i = self.add_course(a);
        let j = self.add_course(b);
        if i == j {
            return Err(TimetableError::SelfConflict(i));
        }
        let key = (i.min(j), i.max(j));
        if !self.pair_set.insert(key) {
            return Ok(false);
        }
        self.pairs.push(key);
        self.adjacency[i].push(j);
        self.adjacency[j].push(i);
        Ok(true)
    }

    /// Index of a course, if present.
    pub fn index_of(&self, course: &C) -> Option<usize> {
        self.index.get(course).copied()
    }

    /// Courses adjacent to `course`, by identifier.
    pub fn neighbors_of<'a>(&'a self, course: &C) -> impl Iterator<Item = &'a C> + 'a {
        let neighbors: &'a [usize] = match self.index_of(course) {
            Some(idx) => &self.adjacency[idx],
            None => &[],
        };
        neighbors.iter().map(move |&n| &self.courses[n])
    }
}

impl<C> ConflictGraph<C> {
    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// All courses in insertion order.
    pub fn courses(&self) -> &[C] {
        &self.courses
    }

    /// The course stored at `idx`.
    pub fn course(&self, idx: usize) -> &C {
        &self.courses[idx]
    }

    /// Indices of the courses conflicting with course `idx`.
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    /// Every conflict exactly once, as `(low, high)` index pairs.
    pub fn conflict_pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Number of conflicts incident to course `idx`.
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    /// Largest degree in the graph, 0 for an empty graph.
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }
}

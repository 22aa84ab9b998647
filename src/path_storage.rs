//! Path Storage
//!
//! Polygons are collected as flat coordinate sequences `[x0,y0,x1,y1,...]`,
//! one sequence per closed subpath.

/// Initial number of coordinate entries allocated
pub const INITIAL_CAPACITY: usize = 10;

/// Next capacity of the coordinate storage
///
/// Doubles while below 1000 entries, grows by half while below 5000
/// and by a fifth after that.
///
///     use scanfill::path_storage::next_capacity;
///
///     assert_eq!(next_capacity(10), 20);
///     assert_eq!(next_capacity(1280), 1920);
///     assert_eq!(next_capacity(6480), 7776);
///
pub fn next_capacity(cap: usize) -> usize {
    if cap < INITIAL_CAPACITY {
        INITIAL_CAPACITY
    } else if cap < 1000 {
        cap * 2
    } else if cap < 5000 {
        cap + cap / 2
    } else {
        cap + cap / 5
    }
}

/// Builds closed polygons from move and line commands
///
///     use scanfill::PathBuilder;
///
///     let mut path = PathBuilder::new();
///     path.move_to(10.0, 10.0);
///     path.line_to(50.0, 90.0);
///     path.line_to(90.0, 10.0);
///     path.finish();
///
///     let sub : Vec<_> = path.subpaths().collect();
///     assert_eq!(sub.len(), 1);
///     // Closing vertex is appended
///     assert_eq!(sub[0], &[10.,10., 50.,90., 90.,10., 10.,10.]);
///
#[derive(Debug)]
pub struct PathBuilder {
    /// Coordinates of all subpaths
    coords: Vec<f64>,
    /// Logical capacity of `coords`, follows [next_capacity]
    capacity: usize,
    /// Number of times `coords` was grown
    reallocations: usize,
    /// Closed subpaths as coordinate ranges (start, end)
    ranges: Vec<(usize, usize)>,
    /// Start of the open subpath, if any
    open: Option<usize>,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder {
    /// Create an empty path
    pub fn new() -> Self {
        Self { coords: Vec::with_capacity(INITIAL_CAPACITY),
               capacity: INITIAL_CAPACITY,
               reallocations: 0,
               ranges: vec![],
               open: None,
        }
    }
    /// Remove all subpaths, keeping the allocated storage
    pub fn remove_all(&mut self) {
        self.coords.clear();
        self.ranges.clear();
        self.open = None;
    }
    /// Start a new subpath at (x,y)
    ///
    /// The previous subpath is closed; if it only held a single point it is
    /// replaced instead.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.close_subpath();
        self.open = Some(self.coords.len());
        self.push(x, y);
    }
    /// Add a vertex to the current subpath
    ///
    /// Repeated points are dropped
    pub fn line_to(&mut self, x: f64, y: f64) {
        let start = match self.open {
            None => return self.move_to(x, y),
            Some(start) => start,
        };
        let n = self.coords.len();
        if n >= start + 2 && self.coords[n-2] == x && self.coords[n-1] == y {
            return;
        }
        self.push(x, y);
    }
    /// Close the last subpath and trim unused storage
    pub fn finish(&mut self) {
        self.close_subpath();
        self.coords.shrink_to_fit();
        self.capacity = self.coords.len();
    }
    /// Closed subpaths as flat coordinate slices
    pub fn subpaths(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.ranges.iter().map(move |&(s, e)| &self.coords[s..e])
    }
    /// Number of closed subpaths
    pub fn num_subpaths(&self) -> usize {
        self.ranges.len()
    }
    /// Path has no closed subpaths
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
    /// Number of coordinate entries stored
    pub fn len(&self) -> usize {
        self.coords.len()
    }
    /// Current capacity of the coordinate storage, in entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// Number of times the coordinate storage has grown
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    fn push(&mut self, x: f64, y: f64) {
        let need = self.coords.len() + 2;
        if need > self.capacity {
            while need > self.capacity {
                self.capacity = next_capacity(self.capacity);
            }
            let extra = self.capacity - self.coords.len();
            self.coords.reserve_exact(extra);
            self.reallocations += 1;
        }
        self.coords.push(x);
        self.coords.push(y);
    }
    fn close_subpath(&mut self) {
        let start = match self.open.take() {
            None => return,
            Some(start) => start,
        };
        let n = self.coords.len();
        if n - start < 4 {
            // Single point, discard
            self.coords.truncate(start);
            return;
        }
        let (x0, y0) = (self.coords[start], self.coords[start+1]);
        if self.coords[n-2] != x0 || self.coords[n-1] != y0 {
            self.push(x0, y0);
        }
        self.ranges.push((start, self.coords.len()));
    }
}

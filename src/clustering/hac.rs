//! Hierarchical agglomerative clustering
//!
//! A straightforward O(n³) agglomerative clusterer over a condensed distance
//! matrix, with Lance-Williams updates for the classic linkage methods. The
//! merge history is kept as a [`Dendrogram`], which supports cophenetic
//! analysis and flat cluster extraction by distance threshold.
//!
//! Ties between equally close cluster pairs are resolved by the lowest slot
//! indices, so the same input always produces the same dendrogram.

use crate::errors::KeyphraseError;
use serde::{Deserialize, Serialize};

/// Linkage criterion used to measure distance between clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Linkage {
    /// Nearest member distance
    Single,
    /// Farthest member distance
    Complete,
    /// Mean member distance (UPGMA)
    #[default]
    Average,
    /// Mean of the two merged clusters' distances (WPGMA)
    Weighted,
    /// Distance between centroids (UPGMC)
    Centroid,
    /// Distance between unweighted centroids (WPGMC)
    Median,
    /// Minimum variance increase
    Ward,
}

impl Linkage {
    /// Name of the linkage method
    pub fn as_str(&self) -> &'static str {
        match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
            Linkage::Weighted => "weighted",
            Linkage::Centroid => "centroid",
            Linkage::Median => "median",
            Linkage::Ward => "ward",
        }
    }

    /// Distance from the union of clusters `i` and `j` to cluster `k`
    ///
    /// `d_ik`, `d_jk`, `d_ij` are the current inter-cluster distances and
    /// `size_*` the cluster sizes before merging.
    fn update(
        &self,
        d_ik: f64,
        d_jk: f64,
        d_ij: f64,
        size_i: f64,
        size_j: f64,
        size_k: f64,
    ) -> f64 {
        match self {
            Linkage::Single => d_ik.min(d_jk),
            Linkage::Complete => d_ik.max(d_jk),
            Linkage::Average => (size_i * d_ik + size_j * d_jk) / (size_i + size_j),
            Linkage::Weighted => (d_ik + d_jk) / 2.0,
            Linkage::Centroid => {
                let total = size_i + size_j;
                let sq = (size_i * d_ik * d_ik + size_j * d_jk * d_jk) / total
                    - size_i * size_j * d_ij * d_ij / (total * total);
                sq.max(0.0).sqrt()
            }
            Linkage::Median => {
                let sq = d_ik * d_ik / 2.0 + d_jk * d_jk / 2.0 - d_ij * d_ij / 4.0;
                sq.max(0.0).sqrt()
            }
            Linkage::Ward => {
                let total = size_i + size_j + size_k;
                let sq = ((size_i + size_k) * d_ik * d_ik + (size_j + size_k) * d_jk * d_jk
                    - size_k * d_ij * d_ij)
                    / total;
                sq.max(0.0).sqrt()
            }
        }
    }
}

impl std::str::FromStr for Linkage {
    type Err = KeyphraseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            "average" => Ok(Linkage::Average),
            "weighted" => Ok(Linkage::Weighted),
            "centroid" => Ok(Linkage::Centroid),
            "median" => Ok(Linkage::Median),
            "ward" => Ok(Linkage::Ward),
            _ => Err(KeyphraseError::UnknownLinkage(value.to_string())),
        }
    }
}

// ============================================================================
// Condensed distance matrix
// ============================================================================

/// Upper triangle of a symmetric distance matrix, row by row
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedMatrix {
    n: usize,
    data: Vec<f64>,
}

impl CondensedMatrix {
    /// Pairwise Euclidean distances between rows
    pub fn euclidean(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let sq: f64 = rows[i]
                    .iter()
                    .zip(rows[j].iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                data.push(sq.sqrt());
            }
        }
        Self { n, data }
    }

    /// Number of observations
    pub fn num_observations(&self) -> usize {
        self.n
    }

    /// Distances in condensed order
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Distance between observations `i` and `j` (0 on the diagonal)
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        self.data[self.offset(a, b)]
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        // Rows before `i` hold (n-1) + (n-2) + ... + (n-i) entries
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }
}

// ============================================================================
// Dendrogram
// ============================================================================

/// One agglomeration step
///
/// Leaves have ids `0..n`; the cluster created by step `s` has id `n + s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    pub size: usize,
}

/// Merge history of an agglomerative clustering run
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    num_leaves: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    /// Number of clustered observations
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Merge steps in the order they happened
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Leaves under every node id (leaves first, then merges)
    fn members(&self) -> Vec<Vec<usize>> {
        let mut members: Vec<Vec<usize>> = (0..self.num_leaves).map(|i| vec![i]).collect();
        for merge in &self.merges {
            let mut joined = members[merge.left].clone();
            joined.extend_from_slice(&members[merge.right]);
            members.push(joined);
        }
        members
    }

    /// Cophenetic distances: the height at which each pair first joins
    pub fn cophenetic_distances(&self) -> CondensedMatrix {
        let n = self.num_leaves;
        let mut coph = CondensedMatrix {
            n,
            data: vec![0.0; n * n.saturating_sub(1) / 2],
        };
        let members = self.members();
        for merge in &self.merges {
            for &a in &members[merge.left] {
                for &b in &members[merge.right] {
                    let (i, j) = if a < b { (a, b) } else { (b, a) };
                    let offset = coph.offset(i, j);
                    coph.data[offset] = merge.distance;
                }
            }
        }
        coph
    }

    /// Flat clusters whose members have cophenetic distance <= `threshold`
    ///
    /// Returns one label per leaf. Labels are numbered from 0 in order of the
    /// first leaf belonging to each cluster.
    pub fn cut_at_distance(&self, threshold: f64) -> Vec<usize> {
        let n = self.num_leaves;
        let mut parent: Vec<usize> = (0..n).collect();

        fn find(parent: &mut [usize], i: usize) -> usize {
            let mut root = i;
            while parent[root] != root {
                root = parent[root];
            }
            let mut node = i;
            while parent[node] != root {
                let next = parent[node];
                parent[node] = root;
                node = next;
            }
            root
        }

        // Highest merge distance inside each subtree; guards against
        // inversions from centroid/median linkage
        let mut max_dist = vec![0.0_f64; n + self.merges.len()];
        let mut representative: Vec<usize> = (0..n).collect();
        for (step, merge) in self.merges.iter().enumerate() {
            let node = n + step;
            max_dist[node] = merge
                .distance
                .max(max_dist[merge.left])
                .max(max_dist[merge.right]);
            let left_leaf = representative[merge.left];
            let right_leaf = representative[merge.right];
            representative.push(left_leaf);

            if max_dist[node] <= threshold {
                let a = find(&mut parent, left_leaf);
                let b = find(&mut parent, right_leaf);
                if a != b {
                    parent[b] = a;
                }
            }
        }

        let mut label_of_root = vec![usize::MAX; n];
        let mut next_label = 0;
        let mut labels = Vec::with_capacity(n);
        for leaf in 0..n {
            let root = find(&mut parent, leaf);
            if label_of_root[root] == usize::MAX {
                label_of_root[root] = next_label;
                next_label += 1;
            }
            labels.push(label_of_root[root]);
        }
        labels
    }
}

/// Run agglomerative clustering over a condensed distance matrix
pub fn linkage(distances: &CondensedMatrix, method: Linkage) -> Dendrogram {
    let n = distances.num_observations();
    if n < 2 {
        return Dendrogram {
            num_leaves: n,
            merges: Vec::new(),
        };
    }

    // Working copy indexed by slot; a merged cluster reuses the lower slot
    let mut dist = vec![vec![0.0; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = distances.get(i, j);
        }
    }
    let mut active = vec![true; n];
    let mut node_id: Vec<usize> = (0..n).collect();
    let mut size = vec![1usize; n];
    let mut merges = Vec::with_capacity(n - 1);

    for step in 0..(n - 1) {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for j in (i + 1)..n {
                if !active[j] {
                    continue;
                }
                let d = dist[i][j];
                if best.map_or(true, |(_, _, b)| d < b) {
                    best = Some((i, j, d));
                }
            }
        }

        let Some((i, j, d_ij)) = best else {
            break;
        };

        let (left, right) = if node_id[i] < node_id[j] {
            (node_id[i], node_id[j])
        } else {
            (node_id[j], node_id[i])
        };
        merges.push(Merge {
            left,
            right,
            distance: d_ij,
            size: size[i] + size[j],
        });

        for k in 0..n {
            if !active[k] || k == i || k == j {
                continue;
            }
            let updated = method.update(
                dist[i][k],
                dist[j][k],
                d_ij,
                size[i] as f64,
                size[j] as f64,
                size[k] as f64,
            );
            dist[i][k] = updated;
            dist[k][i] = updated;
        }

        active[j] = false;
        size[i] += size[j];
        node_id[i] = n + step;
    }

    Dendrogram {
        num_leaves: n,
        merges,
    }
}

/// Pearson correlation between cophenetic and original distances
///
/// Returns `None` when the coefficient is undefined: fewer than two pairs,
/// or no variance in either set of distances.
pub fn cophenetic_correlation(dendrogram: &Dendrogram, distances: &CondensedMatrix) -> Option<f64> {
    let coph = dendrogram.cophenetic_distances();
    let x = distances.values();
    let y = coph.values();
    if x.len() < 2 || x.len() != y.len() {
        return None;
    }

    let len = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / len;
    let mean_y = y.iter().sum::<f64>() / len;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom <= f64::EPSILON {
        None
    } else {
        Some(cov / denom)
    }
}

use core::fmt;

use grid_util::Point;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::error::GridError;

/// Grid dimensions used by [Grid::default], matching the 16x16 map the
/// interactive editor drives.
pub const DEFAULT_WIDTH: usize = 16;
pub const DEFAULT_HEIGHT: usize = 16;

/// A single grid cell. Coordinates and the neighbour list are fixed at
/// construction; only the obstacle flag is mutable, through [Grid].
#[derive(Clone, Debug)]
pub struct Node {
    pub point: Point,
    pub obstacle: bool,
    neighbours: Vec<usize>,
}

impl Node {
    /// Neighbour indices in deterministic [up, down, left, right] order,
    /// filtered by bounds. Obstacle status of the neighbours is not
    /// reflected here; blocked cells keep their adjacency.
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }
}

/// [Grid] owns the node arena and tracks connected components of free cells
/// with a [UnionFind] structure so that path queries between different
/// components can be rejected without flood-filling the map. Obstacle edits
/// keep adjacency intact; a blocked cell is simply never expanded during
/// search.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    nodes: Vec<Node>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Grid {
    /// Allocates a width x height arena of free nodes and computes the
    /// 4-directional adjacency of every node.
    pub fn new(width: usize, height: usize) -> Grid {
        let mut nodes = Vec::with_capacity(width * height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let mut neighbours = Vec::with_capacity(4);
                let ix = y as usize * width + x as usize;
                if y > 0 {
                    neighbours.push(ix - width);
                }
                if (y as usize) < height - 1 {
                    neighbours.push(ix + width);
                }
                if x > 0 {
                    neighbours.push(ix - 1);
                }
                if (x as usize) < width - 1 {
                    neighbours.push(ix + 1);
                }
                nodes.push(Node {
                    point: Point::new(x, y),
                    obstacle: false,
                    neighbours,
                });
            }
        }
        Grid {
            width,
            height,
            nodes,
            components: UnionFind::new(width * height),
            // Starts dirty so the first update() links up the free cells.
            components_dirty: true,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn check_index(&self, index: usize) -> Result<(), GridError> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(GridError::IndexOutOfBounds {
                index,
                len: self.nodes.len(),
            })
        }
    }

    /// Linear index of a coordinate pair: `y * width + x`.
    pub fn index_of(&self, point: Point) -> Result<usize, GridError> {
        if self.in_bounds(point.x, point.y) {
            Ok(point.y as usize * self.width + point.x as usize)
        } else {
            Err(GridError::OutOfBounds {
                x: point.x,
                y: point.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Coordinates of a linear index.
    pub fn point_of(&self, index: usize) -> Result<Point, GridError> {
        self.check_index(index)?;
        Ok(self.nodes[index].point)
    }

    pub fn node(&self, index: usize) -> Result<&Node, GridError> {
        self.check_index(index)?;
        Ok(&self.nodes[index])
    }

    /// Neighbour indices of a node in [up, down, left, right] order.
    pub fn neighbours_of(&self, index: usize) -> Result<&[usize], GridError> {
        self.check_index(index)?;
        Ok(&self.nodes[index].neighbours)
    }

    pub fn is_obstacle(&self, index: usize) -> Result<bool, GridError> {
        self.check_index(index)?;
        Ok(self.nodes[index].obstacle)
    }

    /// Flips the obstacle flag of a node and returns the new value.
    /// Adjacency is untouched; the solver excludes blocked cells itself.
    pub fn toggle_obstacle(&mut self, index: usize) -> Result<bool, GridError> {
        self.check_index(index)?;
        let blocked = !self.nodes[index].obstacle;
        self.set_obstacle(index, blocked)?;
        Ok(blocked)
    }

    /// Updates a node's obstacle flag. Joins newly connected components and
    /// flags the components as dirty if components are (potentially) broken
    /// apart into multiple.
    pub fn set_obstacle(&mut self, index: usize, blocked: bool) -> Result<(), GridError> {
        self.check_index(index)?;
        if self.nodes[index].obstacle != blocked && blocked {
            self.components_dirty = true;
        }
        self.nodes[index].obstacle = blocked;
        if !blocked {
            let neighbours = self.nodes[index].neighbours.clone();
            for n in neighbours {
                if !self.nodes[n].obstacle {
                    self.components.union(index, n);
                }
            }
        }
        Ok(())
    }

    /// Retrieves the component id a given node belongs to.
    pub fn component(&self, index: usize) -> Result<usize, GridError> {
        self.check_index(index)?;
        Ok(self.components.find(index))
    }

    /// Checks if start and end are on the same component of free cells.
    pub fn reachable(&self, start: usize, end: usize) -> bool {
        !self.unreachable(start, end)
    }

    /// Checks if start and end are not on the same component.
    pub fn unreachable(&self, start: usize, end: usize) -> bool {
        if start < self.nodes.len() && end < self.nodes.len() {
            !self.components.equiv(start, end)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid
    /// neighbours to the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.nodes.len());
        self.components_dirty = false;
        for index in 0..self.nodes.len() {
            if self.nodes[index].obstacle {
                continue;
            }
            // Down and right neighbours cover every free pair once.
            let down = index + self.width;
            if down < self.nodes.len() && !self.nodes[down].obstacle {
                self.components.union(index, down);
            }
            if index % self.width + 1 < self.width && !self.nodes[index + 1].obstacle {
                self.components.union(index, index + 1);
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.height {
            let values = (0..self.width)
                .map(|x| self.nodes[y * self.width + x].obstacle as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

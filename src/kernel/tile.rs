use crate::state::*;
use crate::util::*;

/// Local working copy of one tile: `block` owned cells per axis
/// plus `halo` ghost layers on every side.
/// Local coordinates run over `0..block + 2 * halo`, the first owned
/// cell sits at local `(halo, halo)`.
pub struct Tile {
    block: [usize; 2],
    halo: usize,
    origin: Coord,
    extent: Coord,
    cells: Vec<ConservedState>,
}

impl Tile {
    pub fn new(block: [usize; 2], halo: usize) -> Self {
        let extent = vector![
            (block[0] + 2 * halo) as i32,
            (block[1] + 2 * halo) as i32
        ];
        let size = extent[0] as usize * extent[1] as usize;
        Tile {
            block,
            halo,
            origin: Coord::zeros(),
            extent,
            cells: vec![ConservedState::zeros(); size],
        }
    }

    /// Place the tile so its first owned cell is global `origin`.
    pub fn set_origin(&mut self, origin: Coord) {
        self.origin = origin;
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn halo(&self) -> usize {
        self.halo
    }

    /// Owned cells along `axis`.
    pub fn block(&self, axis: Axis) -> usize {
        self.block[axis.index()]
    }

    /// Local cells along `axis`, halo included.
    pub fn extent(&self, axis: Axis) -> usize {
        self.extent[axis.index()] as usize
    }

    /// Every local position.
    pub fn local_aabb(&self) -> AABB {
        AABB::from_extent(self.extent[0] as usize, self.extent[1] as usize)
    }

    /// Local positions of the owned cells.
    pub fn owned_aabb(&self) -> AABB {
        let h = self.halo as i32;
        AABB::from_mm(
            vector![h, h],
            vector![h + self.block[0] as i32 - 1, h + self.block[1] as i32 - 1],
        )
    }

    #[inline]
    pub fn to_global(&self, local: &Coord) -> Coord {
        self.origin + local.add_scalar(-(self.halo as i32))
    }

    #[inline]
    pub fn to_local(&self, global: &Coord) -> Coord {
        (global - self.origin).add_scalar(self.halo as i32)
    }

    #[inline]
    fn index(&self, local: &Coord) -> usize {
        debug_assert!(
            self.local_aabb().contains(local),
            "{:?} outside tile",
            local
        );
        local[1] as usize * self.extent[0] as usize + local[0] as usize
    }

    #[inline]
    pub fn get(&self, local: &Coord) -> ConservedState {
        self.cells[self.index(local)]
    }

    #[inline]
    pub fn get_mut(&mut self, local: &Coord) -> &mut ConservedState {
        let i = self.index(local);
        &mut self.cells[i]
    }

    #[inline]
    pub fn set(&mut self, local: &Coord, q: ConservedState) {
        let i = self.index(local);
        self.cells[i] = q;
    }
}

/// Face fluxes of one sweep over a tile.
/// Face `k` separates local positions `halo - 1 + k` and `halo + k`
/// along the sweep axis, so owned cell `k` lies between faces `k`
/// and `k + 1`. There is one line of faces per local position
/// across the sweep axis, halo lines included.
pub struct FluxArray {
    axis: Axis,
    faces: usize,
    lines: usize,
    values: Vec<ConservedState>,
}

impl FluxArray {
    pub fn new(tile: &Tile, axis: Axis) -> Self {
        let faces = tile.block(axis) + 1;
        let lines = tile.extent(axis.other());
        FluxArray {
            axis,
            faces,
            lines,
            values: vec![ConservedState::zeros(); faces * lines],
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn faces(&self) -> usize {
        self.faces
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    #[inline]
    pub fn get(&self, face: usize, line: usize) -> ConservedState {
        debug_assert!(face < self.faces && line < self.lines);
        self.values[line * self.faces + face]
    }

    #[inline]
    pub fn set(&mut self, face: usize, line: usize, flux: ConservedState) {
        debug_assert!(face < self.faces && line < self.lines);
        self.values[line * self.faces + face] = flux;
    }
}

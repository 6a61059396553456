use crate::error::*;
use crate::field::*;
use crate::util::*;
use vtkio::model::*;

/// Write one time level as an unstructured grid of quads, one per
/// interior cell, with h, hu and hv as cell data.
pub fn write_vtk2d<F: AsRef<std::path::Path>>(
    buffers: &BufferSet,
    dx: f64,
    dy: f64,
    s: &F,
) -> SweResult<()> {
    log::info!("Writing vtk: {:?}", s.as_ref());
    let aabb = buffers.interior();
    let exclusive_bounds = aabb.exclusive_bounds();

    // Cell corners, (nx + 1) x (ny + 1) of them
    let corners = AABB::from_extent(
        exclusive_bounds[0] as usize + 1,
        exclusive_bounds[1] as usize + 1,
    );
    let mut points = Vec::with_capacity(3 * corners.buffer_size());
    for coord in corners.coord_iter() {
        points.push(coord[0] as f64 * dx);
        points.push(coord[1] as f64 * dy);
        points.push(0.0);
    }

    let n_cells = aabb.buffer_size();
    let mut connectivity = Vec::with_capacity(4 * n_cells);
    let mut offsets = Vec::with_capacity(n_cells);
    let mut cell_types = Vec::with_capacity(n_cells);
    let mut offset = 4;
    for cell_coord in aabb.coord_iter() {
        let vertices = [
            cell_coord,
            cell_coord + vector![1, 0],
            cell_coord + vector![1, 1],
            cell_coord + vector![0, 1],
        ];
        for v in vertices.iter() {
            connectivity.push(corners.coord_to_linear(v) as u64);
        }
        offsets.push(offset);
        cell_types.push(CellType::Quad);
        offset += 4;
    }

    let cell_data = |name: &str, field: &Field| {
        let data: Vec<f64> =
            aabb.coord_iter().map(|c| field.get(&c)).collect();
        Attribute::DataArray(DataArray {
            name: name.to_string(),
            elem: ElementType::Scalars {
                num_comp: 1,
                lookup_table: None,
            },
            data: IOBuffer::F64(data),
        })
    };

    Vtk {
        version: Version::Auto,
        title: String::new(),
        byte_order: ByteOrder::LittleEndian,
        file_path: None,
        data: DataSet::inline(UnstructuredGridPiece {
            points: IOBuffer::F64(points),
            cells: Cells {
                cell_verts: VertexNumbers::XML {
                    connectivity,
                    offsets,
                },
                types: cell_types,
            },
            data: Attributes {
                point: vec![],
                cell: vec![
                    cell_data("h", &buffers.h),
                    cell_data("hu", &buffers.hu),
                    cell_data("hv", &buffers.hv),
                ],
            },
        }),
    }
    .export(s)
    .map_err(|e| SweError::Vtk(format!("{:?}", e)))
}

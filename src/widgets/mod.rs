pub mod cell_grid;

pub mod resource_list;
pub mod sales_points;

pub mod category_dto;

pub use category_dto::{
    CategoryQuery, CategoryResponseDto, CategorySummaryDto, CreateCategoryDto, UpdateCategoryDto,
};
